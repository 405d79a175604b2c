//! SDL community controller database (`gamecontrollerdb.txt`)
//!
//! One device per line: `guid,name,key:token,key:token,...`. A `platform:`
//! field is kept as metadata. Lines are matched on the normalized GUID (see
//! [`Guid::normalized`]); the first line for a GUID wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::controller::Guid;
use crate::mapping::descriptor::Token;
use crate::mapping::MappingError;

/// Parsed mapping of one database line
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseRecord {
    pub guid: Guid,
    pub name: String,
    pub platform: Option<String>,
    /// SDL name (`a`, `dpup`, `leftx`, `-lefty`, ...) to parsed token
    pub bindings: HashMap<String, Token>,
}

impl DatabaseRecord {
    pub fn binding(&self, sdl_name: &str) -> Option<Token> {
        self.bindings.get(sdl_name).copied()
    }
}

/// Parsed community database, keyed by normalized GUID
#[derive(Debug, Clone, Default)]
pub struct ControllerDatabase {
    source: PathBuf,
    records: HashMap<String, DatabaseRecord>,
}

impl ControllerDatabase {
    /// Reads and parses the whole file; the handle is closed before returning
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MappingError::DatabaseUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut database = Self::parse(&content);
        database.source = path.to_path_buf();
        info!(
            "Loaded {} controller mappings from {}",
            database.len(),
            path.display()
        );
        Ok(database)
    }

    /// Parses database text; bad lines are logged and skipped, the first
    /// entry for a GUID wins
    pub fn parse(content: &str) -> Self {
        let mut records = HashMap::new();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Ok(record) => {
                    let key = record.guid.normalized();
                    if records.contains_key(&key) {
                        debug!("Line {}: duplicate GUID {}, keeping first", number + 1, record.guid);
                        continue;
                    }
                    records.insert(key, record);
                }
                Err(e) => warn!("Skipping controller database line {}: {}", number + 1, e),
            }
        }

        Self {
            source: PathBuf::new(),
            records,
        }
    }

    /// Record for a device, ignoring the GUID revision suffix
    pub fn lookup(&self, guid: &Guid) -> Result<&DatabaseRecord, MappingError> {
        self.records
            .get(&guid.normalized())
            .ok_or_else(|| MappingError::DeviceNotInDatabase {
                guid: guid.to_string(),
            })
    }

    /// File the database was loaded from, empty for parsed text
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Looks one GUID up in a database file. Every failure is "not found".
pub fn find_mapping(path: impl AsRef<Path>, guid: &str) -> Option<DatabaseRecord> {
    let guid = match Guid::parse(guid) {
        Ok(guid) => guid,
        Err(e) => {
            warn!("{}", e);
            return None;
        }
    };
    let database = match ControllerDatabase::load(path) {
        Ok(db) => db,
        Err(e) => {
            warn!("{}", e);
            return None;
        }
    };
    match database.lookup(&guid) {
        Ok(record) => Some(record.clone()),
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}

fn parse_line(line: &str) -> Result<DatabaseRecord, MappingError> {
    let mut fields = line.split(',');
    let guid = Guid::parse(fields.next().unwrap_or_default())?;
    let name = fields
        .next()
        .map(str::trim)
        .ok_or_else(|| MappingError::ConfigError(format!("missing name for {guid}")))?
        .to_string();

    let mut platform = None;
    let mut bindings = HashMap::new();

    for field in fields.map(str::trim).filter(|f| !f.is_empty()) {
        let Some((key, token)) = field.split_once(':') else {
            debug!("Ignoring field without ':' for {}: {:?}", guid, field);
            continue;
        };
        if key == "platform" {
            platform = Some(token.to_string());
            continue;
        }
        let parsed = match token.parse::<Token>() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{} ({}): {}", name, key, e);
                Token::UNBOUND
            }
        };
        bindings.entry(key.to_string()).or_insert(parsed);
    }

    Ok(DatabaseRecord {
        guid,
        name,
        platform,
        bindings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::descriptor::{AxisRange, AxisSign};
    use crate::mapping::RawControlDescriptor;
    use std::io::Write;

    const XBOX_LINE: &str =
        "030000005e0400008e02000000007801,Xbox,a:b0,b:b1,leftx:a0,dpup:h0.1";

    fn guid(s: &str) -> Guid {
        Guid::parse(s).unwrap()
    }

    #[test]
    fn parses_line_with_platform() {
        let db = ControllerDatabase::parse(
            "# comment\n\n030000004c050000c405000000010000,PS4 Controller,a:b1,lefty:a1~,platform:Linux,\n",
        );
        let record = db.lookup(&guid("030000004c050000c405000000010000")).unwrap();
        assert_eq!(record.name, "PS4 Controller");
        assert_eq!(record.platform.as_deref(), Some("Linux"));
        assert_eq!(record.binding("lefty").unwrap().range, AxisRange::FullInverted);
        assert!(record.binding("platform").is_none());
    }

    #[test]
    fn suffix_is_ignored_when_matching() {
        let db = ControllerDatabase::parse(XBOX_LINE);
        let record = db.lookup(&guid("030000005e0400008e0200000000ffff")).unwrap();
        assert_eq!(
            record.binding("a").unwrap().control,
            RawControlDescriptor::Button { id: 0 }
        );
    }

    #[test]
    fn first_duplicate_wins() {
        let db = ControllerDatabase::parse(&format!(
            "{XBOX_LINE}\n030000005e0400008e02000000000000,Other,a:b5\n"
        ));
        assert_eq!(db.len(), 1);
        let record = db.lookup(&guid("030000005e0400008e02000000000000")).unwrap();
        assert_eq!(record.name, "Xbox");
    }

    #[test]
    fn malformed_tokens_become_unbound() {
        let db = ControllerDatabase::parse(
            "030000005e0400008e02000000007801,Broken,a:q7,b:b1,-leftx:-a0\n",
        );
        let record = db.lookup(&guid("030000005e0400008e02000000007801")).unwrap();
        assert_eq!(record.binding("a"), Some(Token::UNBOUND));
        let half = record.binding("-leftx").unwrap();
        assert_eq!(
            half.control,
            RawControlDescriptor::Axis {
                id: 0,
                sign: AxisSign::Negative
            }
        );
    }

    #[test]
    fn bad_lines_are_skipped() {
        let db = ControllerDatabase::parse(&format!("nothex,Name,a:b0\nshort\n{XBOX_LINE}\n"));
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn unknown_guid_is_not_found() {
        let db = ControllerDatabase::parse(XBOX_LINE);
        let err = db.lookup(&guid("03000000de280000ff11000001000000")).unwrap_err();
        assert!(matches!(err, MappingError::DeviceNotInDatabase { .. }));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = ControllerDatabase::load(dir.path().join("gamecontrollerdb.txt")).unwrap_err();
        assert!(matches!(err, MappingError::DatabaseUnavailable { .. }));
        assert!(find_mapping(dir.path().join("gamecontrollerdb.txt"), "030000005e0400008e02000000007801").is_none());
    }

    #[test]
    fn find_mapping_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{XBOX_LINE}").unwrap();
        let record = find_mapping(file.path(), "030000005e0400008e02000000001234").unwrap();
        assert_eq!(record.name, "Xbox");
        assert!(find_mapping(file.path(), "not-a-guid").is_none());
        assert!(find_mapping(file.path(), "03000000de280000ff11000001000000").is_none());

        let db = ControllerDatabase::load(file.path()).unwrap();
        assert_eq!(db.source(), file.path());
        assert_eq!(db.len(), 1);
    }
}
