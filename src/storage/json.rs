//! JSON document storage.
//!
//! The file holds a single JSON array of plant records with camelCase keys and
//! RFC 3339 timestamps, the same shape the browser version kept in local storage.

use super::PlantRepository;
use crate::{
    errors::{Error, Result},
    models::Plant,
};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// Stores the collection as a JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonPlantRepository {
    path: PathBuf,
}

impl JsonPlantRepository {
    /// Repository backed by the file at `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file that a save is written to before it replaces the document.
    #[must_use]
    pub fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "plants".into(), |name| name.to_string_lossy());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

/// Encodes plants as the JSON storage document.
pub fn encode_plants(plants: &[Plant]) -> Result<String> {
    serde_json::to_string_pretty(plants).map_err(Into::into)
}

/// Decodes the JSON storage document.
///
/// Records with malformed fields, timestamps or out-of-range numbers are
/// reported as a storage error; the document is written only by this crate, so
/// they indicate corruption.
pub fn decode_plants(contents: &str) -> Result<Vec<Plant>> {
    let plants: Vec<Plant> = serde_json::from_str(contents).map_err(|e| Error::Storage {
        message: format!("Failed to decode plant records: {e}"),
    })?;
    for plant in &plants {
        plant.check_stored()?;
    }
    Ok(plants)
}

impl PlantRepository for JsonPlantRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<Vec<Plant>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No plant file yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }
        let plants = decode_plants(&contents)?;
        debug!("Loaded {} plants", plants.len());
        Ok(Some(plants))
    }

    #[instrument(skip(self, plants), fields(path = %self.path.display(), count = plants.len()))]
    async fn save(&mut self, plants: &[Plant]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let document = encode_plants(plants)?;

        // The document is replaced only once the new one is fully on disk.
        let staging = self.staging_path();
        {
            let mut file = fs::File::create(&staging)?;
            file.write_all(document.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&staging, &self.path)?;
        debug!("Saved plants");
        Ok(())
    }
}
