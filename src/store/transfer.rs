//! Export and import of the full dataset.

use std::path::{Path, PathBuf};

use tracing::info;

use super::AppStore;
use crate::services::backup;
use crate::types::errors::StoreError;
use crate::types::transfer::DataBundle;

impl AppStore {
    /// Fetches the dataset and writes it to `<dir>/nav-panel-backup.json`.
    pub async fn export_data(&mut self, dir: &Path) -> Result<PathBuf, StoreError> {
        let _busy = self.begin();
        let bundle = match self.api.export_data().await {
            Ok(bundle) => bundle,
            Err(e) => return Err(self.fail("Error exporting data", e)),
        };
        match backup::write_backup(dir, &bundle) {
            Ok(path) => {
                info!("Data exported to {}", path.display());
                Ok(path)
            }
            Err(e) => Err(self.fail("Error exporting data", e)),
        }
    }

    /// Posts `bundle` to the backend as-is, then reloads everything.
    pub async fn import_data(&mut self, bundle: DataBundle) -> Result<(), StoreError> {
        let _busy = self.begin();
        if let Err(e) = self.api.import_data(&bundle).await {
            return Err(self.fail("Error importing data", e));
        }
        if let Err(e) = self.load_data().await {
            return Err(self.fail("Error importing data", e));
        }
        info!("Data imported");
        Ok(())
    }

    /// Reads a backup file and imports it.
    pub async fn import_file(&mut self, path: &Path) -> Result<(), StoreError> {
        let bundle = match backup::read_backup(path) {
            Ok(bundle) => bundle,
            Err(e) => return Err(self.fail("Error importing data", e)),
        };
        self.import_data(bundle).await
    }
}
