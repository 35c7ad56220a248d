use circleseek::{IconRef, RenderError};
use gdk_pixbuf::Pixbuf;
use std::collections::{HashMap, HashSet};
use std::path::Path;

type IconKey = (IconRef, i32, i32);

/// Dot icons loaded from disk, keyed by path and requested size.
///
/// A failed load is reported once; later lookups of the same key return
/// `Ok(None)` without touching the filesystem until [`clear`](Self::clear).
#[derive(Default)]
pub struct IconCache {
    icons: HashMap<IconKey, Pixbuf>,
    failed: HashSet<IconKey>,
}

impl IconCache {
    pub fn get(
        &mut self,
        icon: &IconRef,
        width: i32,
        height: i32,
    ) -> Result<Option<Pixbuf>, RenderError> {
        let key = (icon.clone(), width, height);
        if let Some(pixbuf) = self.icons.get(&key) {
            return Ok(Some(pixbuf.clone()));
        }
        if self.failed.contains(&key) {
            return Ok(None);
        }

        match Self::load(icon, width, height) {
            Ok(pixbuf) => {
                self.icons.insert(key, pixbuf.clone());
                Ok(Some(pixbuf))
            }
            Err(e) => {
                self.failed.insert(key);
                Err(e)
            }
        }
    }

    /// Forgets loaded icons and past failures, e.g. after a config reload.
    pub fn clear(&mut self) {
        self.icons.clear();
        self.failed.clear();
    }

    fn load(icon: &IconRef, width: i32, height: i32) -> Result<Pixbuf, RenderError> {
        let path = Path::new(icon.as_str());
        if !path.exists() {
            return Err(RenderError::IconNotFound(icon.clone()));
        }

        Pixbuf::from_file_at_scale(path, width, height, true).map_err(|e| RenderError::IconLoad {
            icon: icon.clone(),
            reason: e.to_string(),
        })
    }
}
