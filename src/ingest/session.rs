//! Loaded-dataset session backing the data page

use super::export::{export_file_name, serialize};
use super::parser::{parse_with, IngestedDataset};
use super::IngestError;
use crate::config::constants::demo;
use crate::config::IngestSettings;
use crate::simulation::generate_demo_samples;
use rand::Rng;
use tracing::{info, warn};

/// A dataset together with the name it was loaded under
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub file_name: String,
    pub dataset: IngestedDataset,
}

/// CSV ready to hand to the host's download collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedCsv {
    pub file_name: String,
    pub contents: String,
}

/// Holds at most one dataset; loads replace it, `clear` drops it
#[derive(Debug, Default)]
pub struct DataSession {
    settings: IngestSettings,
    current: Option<LoadedDataset>,
}

impl DataSession {
    pub fn new(settings: IngestSettings) -> Self {
        Self {
            settings,
            current: None,
        }
    }

    /// Parse `raw_text` and make it the current dataset.
    ///
    /// A blob without samples leaves any previous dataset in place.
    pub fn load(&mut self, file_name: &str, raw_text: &str) -> Result<&LoadedDataset, IngestError> {
        match parse_with(raw_text, &self.settings) {
            Ok(dataset) => Ok(self.replace(file_name, dataset)),
            Err(err) => {
                warn!(file = file_name, error = %err, "rejected ingested file");
                Err(err)
            }
        }
    }

    /// Load the built-in demo recording
    pub fn load_generated_sample<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&LoadedDataset, IngestError> {
        let dataset = IngestedDataset::from_samples(generate_demo_samples(rng))?;
        Ok(self.replace(demo::FILE_NAME, dataset))
    }

    fn replace(&mut self, file_name: &str, dataset: IngestedDataset) -> &LoadedDataset {
        info!(file = file_name, stats = %dataset.stats(), "dataset loaded");
        self.current.insert(LoadedDataset {
            file_name: file_name.to_string(),
            dataset,
        })
    }

    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            info!("dataset cleared");
        }
    }

    pub fn current(&self) -> Option<&LoadedDataset> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// CSV export of the current dataset, `None` when nothing is loaded
    pub fn export(&self) -> Option<ExportedCsv> {
        self.current.as_ref().map(|loaded| ExportedCsv {
            file_name: export_file_name(&loaded.file_name),
            contents: serialize(loaded.dataset.samples()),
        })
    }
}
