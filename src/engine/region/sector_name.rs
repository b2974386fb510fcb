use std::fmt;
use std::path::Path;

use crate::engine::errors::CleanerError;

pub const REGION_EXTENSION: &str = "mca";
pub const REGION_PREFIX: &str = "r";

/// Region coordinates as encoded in `r.<x>.<z>.mca`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectorName {
    pub x: i32,
    pub z: i32,
}

impl SectorName {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}.{}.{}", REGION_PREFIX, self.x, self.z, REGION_EXTENSION)
    }

    /// Checks the file name shape without touching the filesystem:
    /// too short for the convention is `InvalidFilename`, wrong extension is
    /// `InvalidFormat`. Returns the file name on success.
    pub fn check_extension(path: &Path) -> Result<&str, CleanerError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CleanerError::InvalidFilename {
                path: path.to_path_buf(),
                reason: "no file name".to_string(),
            })?;

        if name.len() <= REGION_EXTENSION.len() + 1 {
            return Err(CleanerError::InvalidFilename {
                path: path.to_path_buf(),
                reason: "file name too short".to_string(),
            });
        }

        let has_extension = name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext == REGION_EXTENSION);
        if !has_extension {
            return Err(CleanerError::InvalidFormat {
                path: path.to_path_buf(),
                reason: format!("expected a .{} file", REGION_EXTENSION),
            });
        }

        Ok(name)
    }

    /// Parses the coordinates out of a file name that already passed
    /// `check_extension`.
    pub fn parse(path: &Path) -> Result<Self, CleanerError> {
        let name = Self::check_extension(path)?;
        let invalid = |reason: String| CleanerError::InvalidFilename {
            path: path.to_path_buf(),
            reason,
        };

        let parts: Vec<&str> = name.split('.').collect();
        let [prefix, x, z, _ext] = parts.as_slice() else {
            return Err(invalid(format!(
                "expected {}.<x>.<z>.{}",
                REGION_PREFIX, REGION_EXTENSION
            )));
        };
        if *prefix != REGION_PREFIX {
            return Err(invalid(format!("unexpected prefix {:?}", prefix)));
        }

        let x = x
            .parse::<i32>()
            .map_err(|e| invalid(format!("bad x coordinate {:?}: {}", x, e)))?;
        let z = z
            .parse::<i32>()
            .map_err(|e| invalid(format!("bad z coordinate {:?}: {}", z, e)))?;

        Ok(Self { x, z })
    }
}

impl fmt::Display for SectorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}
