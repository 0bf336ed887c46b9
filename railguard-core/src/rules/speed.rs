use crate::imports::*;

/// Maximum speed (km/h) tabulated by gradient and brake percentage.
///
/// `speeds[i][j]` is the permitted speed on gradient `slopes[i]` (per mille)
/// with brake percentage `percentages[j]`.  Both axes are strictly
/// ascending.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrakeSpeedTable {
    pub slopes: Vec<i32>,
    pub percentages: Vec<u32>,
    pub speeds: Vec<Vec<u32>>,
}

impl SerdeAPI for BrakeSpeedTable {
    fn init(&mut self) -> anyhow::Result<()> {
        ensure!(
            self.slopes.windows(2).all(|w| w[0] < w[1]),
            Error::InitError(format!("{}\nslopes must be strictly ascending", format_dbg!()))
        );
        ensure!(
            self.percentages.windows(2).all(|w| w[0] < w[1]),
            Error::InitError(format!(
                "{}\nbrake percentages must be strictly ascending",
                format_dbg!()
            ))
        );
        ensure!(
            self.speeds.len() == self.slopes.len(),
            Error::InitError(format!(
                "{}\n{} speed rows for {} slopes",
                format_dbg!(),
                self.speeds.len(),
                self.slopes.len()
            ))
        );
        for (slope, row) in self.slopes.iter().zip(&self.speeds) {
            ensure!(
                row.len() == self.percentages.len(),
                Error::InitError(format!(
                    "{}\nrow for slope {slope} has {} speeds, expected {}",
                    format_dbg!(),
                    row.len(),
                    self.percentages.len()
                ))
            );
        }
        Ok(())
    }
}

impl BrakeSpeedTable {
    pub fn new(slopes: Vec<i32>, percentages: Vec<u32>, speeds: Vec<Vec<u32>>) -> anyhow::Result<Self> {
        let mut table = Self {
            slopes,
            percentages,
            speeds,
        };
        table.init()?;
        Ok(table)
    }

    /// Looks up the permitted speed.  The row is the first tabulated slope
    /// at or above `slope`, the column the largest tabulated percentage at or
    /// below `brake_percentage`.  A request outside the table yields 0.
    pub fn lookup(&self, slope: i32, brake_percentage: u32) -> u32 {
        let row = self.slopes.partition_point(|s| *s < slope);
        let col = self.percentages.partition_point(|p| *p <= brake_percentage);
        if row == self.slopes.len() || col == 0 {
            #[cfg(feature = "logging")]
            log::warn!(
                "No speed rule covers slope {} with brake percentage {}",
                slope,
                brake_percentage
            );
            return 0;
        }
        self.speeds[row][col - 1]
    }
}

/// Reads a [BrakeSpeedTable] from CSV.  The first row holds the brake
/// percentages (its first cell is ignored), every following row starts with
/// the slope followed by one speed per percentage.  Blank cells and `-` mean
/// speed 0.
pub fn import_brake_speed_table<P: AsRef<Path>>(filepath: P) -> anyhow::Result<BrakeSpeedTable> {
    let filepath = filepath.as_ref();
    let file_read =
        File::open(filepath).with_context(|| format!("Could not open {filepath:?}"))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file_read);
    let mut records = reader.records();
    let header = records
        .next()
        .with_context(|| format!("{}\n{filepath:?} is empty", format_dbg!()))??;
    let percentages = header
        .iter()
        .skip(1)
        .map(|cell| {
            cell.trim()
                .parse::<u32>()
                .with_context(|| format!("{filepath:?}: bad brake percentage {cell:?}"))
        })
        .collect::<anyhow::Result<Vec<u32>>>()?;

    let mut slopes = vec![];
    let mut speeds = vec![];
    for record in records {
        let record = record?;
        let slope_cell = record.get(0).unwrap_or_default().trim();
        let slope: i32 = slope_cell
            .parse()
            .with_context(|| format!("{filepath:?}: bad slope {slope_cell:?}"))?;
        let row = record
            .iter()
            .skip(1)
            .map(|cell| match cell.trim() {
                "" | "-" => Ok(0),
                value => value
                    .parse::<u32>()
                    .with_context(|| format!("{filepath:?}: bad speed {value:?} at slope {slope}")),
            })
            .collect::<anyhow::Result<Vec<u32>>>()?;
        slopes.push(slope);
        speeds.push(row);
    }
    BrakeSpeedTable::new(slopes, percentages, speeds)
        .with_context(|| format!("{filepath:?} is not a valid speed table"))
}

/// Simplified speed rule used when no speed table is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpeedRule {
    /// Below this brake percentage departure is not permitted
    pub min_brake_percentage: u32,
    /// Gradients steeper than this (per mille) get `steep_speed`
    pub steep_slope: i32,
    pub steep_speed: u32,
    pub nominal_speed: u32,
}

impl Default for ThresholdSpeedRule {
    fn default() -> Self {
        Self {
            min_brake_percentage: 40,
            steep_slope: 20,
            steep_speed: 40,
            nominal_speed: 60,
        }
    }
}

impl ThresholdSpeedRule {
    pub fn lookup(&self, slope: i32, brake_percentage: u32) -> u32 {
        if brake_percentage < self.min_brake_percentage {
            0
        } else if slope > self.steep_slope {
            self.steep_speed
        } else {
            self.nominal_speed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpeedRule {
    Table(BrakeSpeedTable),
    Threshold(ThresholdSpeedRule),
}

impl Default for SpeedRule {
    fn default() -> Self {
        Self::Threshold(ThresholdSpeedRule::default())
    }
}

impl SpeedRule {
    pub fn lookup(&self, slope: i32, brake_percentage: u32) -> u32 {
        match self {
            Self::Table(table) => table.lookup(slope, brake_percentage),
            Self::Threshold(rule) => rule.lookup(slope, brake_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_table() -> BrakeSpeedTable {
        import_brake_speed_table(Path::new("./src/rules/test_brake_speed_table.csv")).unwrap()
    }

    #[test]
    fn test_table_import() {
        let table = test_table();
        assert_eq!(table.slopes, vec![0, 10, 20, 30]);
        assert_eq!(table.percentages, vec![40, 50, 60, 70]);
        assert_eq!(table.speeds[3][0], 0);
    }

    #[test]
    fn test_exact_lookup() {
        let table = test_table();
        assert_eq!(table.lookup(10, 60), 70);
        assert_eq!(table.lookup(0, 70), 90);
    }

    #[test]
    fn test_lookup_rounds_toward_caution() {
        let table = test_table();
        // slope 12 reads the 20 row, 68 % reads the 60 column
        assert_eq!(table.lookup(12, 68), table.lookup(20, 60));
        assert_eq!(table.lookup(-5, 45), table.lookup(0, 40));
    }

    #[test]
    fn test_lookup_outside_table() {
        let table = test_table();
        assert_eq!(table.lookup(31, 90), 0);
        assert_eq!(table.lookup(0, 39), 0);
        assert_eq!(table.lookup(0, 250), 90);
    }

    #[test]
    fn test_invalid_table() {
        assert!(BrakeSpeedTable::new(vec![10, 0], vec![40], vec![vec![50], vec![60]]).is_err());
        assert!(BrakeSpeedTable::new(vec![0], vec![40, 50], vec![vec![50]]).is_err());
        assert!(BrakeSpeedTable::new(vec![0, 10], vec![40], vec![vec![50]]).is_err());
    }

    #[test]
    fn test_threshold_rule() {
        let rule = ThresholdSpeedRule::default();
        assert_eq!(rule.lookup(10, 39), 0);
        assert_eq!(rule.lookup(10, 40), 60);
        assert_eq!(rule.lookup(20, 68), 60);
        assert_eq!(rule.lookup(21, 68), 40);
    }
}
