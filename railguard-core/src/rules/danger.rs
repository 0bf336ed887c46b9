use crate::imports::*;

/// Compatibility between two dangerous-goods classes travelling in the same
/// train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DangerStatus {
    /// `-`: the two wagons must not be adjacent
    Forbidden,
    /// `1`: at least one buffer wagon between them
    OneBuffer,
    /// `2`: at least two buffer wagons between them
    TwoBuffers,
    /// `+`: compatible
    Allowed,
    /// `*`: no restriction
    Unrestricted,
}

impl DangerStatus {
    /// Parses a matrix symbol.  Returns `None` for anything unrecognized;
    /// callers must treat that as [DangerStatus::Forbidden].
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "-" => Some(Self::Forbidden),
            "1" => Some(Self::OneBuffer),
            "2" => Some(Self::TwoBuffers),
            "+" => Some(Self::Allowed),
            "*" => Some(Self::Unrestricted),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Forbidden => "-",
            Self::OneBuffer => "1",
            Self::TwoBuffers => "2",
            Self::Allowed => "+",
            Self::Unrestricted => "*",
        }
    }

    /// Smallest permitted difference in sequence position between the two
    /// wagons, where 1 means adjacent
    pub fn min_gap(&self) -> usize {
        match self {
            Self::Forbidden | Self::OneBuffer => 2,
            Self::TwoBuffers => 3,
            Self::Allowed | Self::Unrestricted => 1,
        }
    }

    /// Number of buffer wagons required between the two wagons
    pub fn buffers_required(&self) -> usize {
        self.min_gap() - 1
    }
}

impl fmt::Display for DangerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One directed cell of the compatibility matrix.  The status is kept as the
/// raw symbol so that tables with unknown symbols still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerRule {
    pub code_a: String,
    pub code_b: String,
    pub status: String,
}

impl DangerRule {
    pub fn new<A: Into<String>, B: Into<String>, S: Into<String>>(
        code_a: A,
        code_b: B,
        status: S,
    ) -> Self {
        Self {
            code_a: code_a.into(),
            code_b: code_b.into(),
            status: status.into(),
        }
    }

    /// Parsed status, `None` if the symbol is not recognized
    pub fn status(&self) -> Option<DangerStatus> {
        DangerStatus::from_symbol(&self.status)
    }
}

/// Reads a compatibility matrix from CSV.  The first row holds the column
/// codes (its first cell is ignored), every following row starts with the
/// row code followed by one status symbol per column.  Blank cells produce
/// no rule.
pub fn import_danger_matrix<P: AsRef<Path>>(filepath: P) -> anyhow::Result<Vec<DangerRule>> {
    let filepath = filepath.as_ref();
    let file_read =
        File::open(filepath).with_context(|| format!("Could not open {filepath:?}"))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file_read);
    let mut records = reader.records();
    let header = records
        .next()
        .with_context(|| format!("{}\n{filepath:?} is empty", format_dbg!()))??;
    let codes_b: Vec<String> = header.iter().skip(1).map(|c| c.trim().to_string()).collect();

    let mut rules = vec![];
    for record in records {
        let record = record?;
        let code_a = match record.get(0).map(str::trim) {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => continue,
        };
        for (code_b, cell) in codes_b.iter().zip(record.iter().skip(1)) {
            let status = cell.trim();
            if status.is_empty() || code_b.is_empty() {
                continue;
            }
            rules.push(DangerRule::new(code_a.clone(), code_b.clone(), status));
        }
    }
    #[cfg(feature = "logging")]
    log::info!("Loaded {} danger rules from {:?}", rules.len(), filepath);
    Ok(rules)
}
