//! Launch-time driver: database, tables and encoder in one pass

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::controller::PhysicalDevice;
use crate::mapping::strategy::encode_capped;
use crate::mapping::{
    ControllerDatabase, EncodeReport, Normalizer, PlayerMapping, TargetEncoder, TranslationTables,
};
use crate::persistence::ConfigSink;

/// Runs the normalization and encoding steps for one generator invocation
pub struct ConfigurationManager {
    tables: TranslationTables,
    database_path: Option<PathBuf>,
    player_limit: Option<usize>,
}

impl ConfigurationManager {
    pub fn new(tables: TranslationTables, database_path: Option<PathBuf>) -> Self {
        info!("Creating ConfigurationManager");
        Self {
            tables,
            database_path,
            player_limit: None,
        }
    }

    /// Lowers the encoder's player cap; never raises it
    pub fn with_player_limit(mut self, limit: Option<usize>) -> Self {
        self.player_limit = limit;
        self
    }

    /// Builds every table and writes the target configuration into `sink`
    ///
    /// Never fails: database and device problems end up in the report and
    /// the affected keys stay unbound.
    pub fn configure(
        &self,
        devices: &[PhysicalDevice],
        encoder: &dyn TargetEncoder,
        sink: &mut dyn ConfigSink,
    ) -> EncodeReport {
        info!(
            "Configuring {} device(s) for {}",
            devices.len(),
            encoder.get_name()
        );

        let mut issues = Vec::new();
        let needs_database = devices.iter().any(|d| !d.is_keyboard);
        let database = match (&self.database_path, needs_database) {
            (Some(path), true) => match ControllerDatabase::load(path) {
                Ok(db) => {
                    debug!("Resolving pads against {}", db.source().display());
                    Some(db)
                }
                Err(e) => {
                    warn!("{}, skipping automatic controller configuration", e);
                    issues.push(e);
                    None
                }
            },
            (None, true) => {
                info!("No controller database configured, using native captures only");
                None
            }
            _ => None,
        };

        let normalizer = Normalizer::new(&self.tables, database.as_ref(), encoder.capabilities());
        let mut players = Vec::with_capacity(devices.len());
        for device in devices {
            let (table, issue) = normalizer.build_table(device);
            issues.extend(issue);
            players.push(PlayerMapping { device, table });
        }

        let mut report = encode_capped(encoder, &players, sink, self.player_limit);
        issues.append(&mut report.issues);
        report.issues = issues;

        info!(
            "Wrote players {:?} for {}, dropped {:?}",
            report.written,
            encoder.get_type(),
            report.dropped
        );
        report
    }
}
