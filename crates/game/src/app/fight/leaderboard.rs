#[derive(Debug, Error)]
enum LeaderboardError {
    #[error("failed to read leaderboard file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse leaderboard file {path} at {location}")]
    Parse {
        path: PathBuf,
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize leaderboard")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write leaderboard file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One finished match, appended to the JSON log at termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MatchRecord {
    winner: String,
    timestamp_ms: u64,
    duration_ticks: u64,
    peak_combo: u32,
}

/// Append-only JSON match log. Reads tolerate a missing file; writes go
/// through a temp file and rename so a crash never truncates the log.
pub(crate) struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Resolves the log path from the data-dir env var, falling back to the
    /// working directory.
    pub(crate) fn from_env() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(LEADERBOARD_FILE))
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<MatchRecord>, LeaderboardError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(LeaderboardError::Read {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };
        let mut deserializer = serde_json::Deserializer::from_str(&text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            LeaderboardError::Parse {
                path: self.path.clone(),
                location: err.path().to_string(),
                source: err.into_inner(),
            }
        })
    }

    fn append(&self, record: MatchRecord) -> Result<(), LeaderboardError> {
        let mut records = self.load()?;
        records.push(record);
        let json = serde_json::to_string_pretty(&records)
            .map_err(|source| LeaderboardError::Serialize { source })?;
        self.write_atomic(json.as_bytes())
    }

    fn write_atomic(&self, bytes: &[u8]) -> Result<(), LeaderboardError> {
        let tmp_path = temp_sibling_path(&self.path);
        let result = write_then_rename(&tmp_path, &self.path, bytes);
        if result.is_err() {
            // Leave no stray temp file behind on a failed write.
            let _ = fs::remove_file(&tmp_path);
        }
        result.map_err(|source| LeaderboardError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn temp_sibling_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| std::ffi::OsString::from(LEADERBOARD_FILE));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_then_rename(tmp_path: &Path, final_path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(tmp_path, bytes)?;
    match fs::remove_file(final_path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    fs::rename(tmp_path, final_path)
}
