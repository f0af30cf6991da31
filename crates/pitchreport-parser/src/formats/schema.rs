use super::normalize_header;

/// Columns of the tracking export that the loader understands. Anything else
/// in the header is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchColumn {
    PitchNo,
    Pitcher,
    PitchType,
    Velocity,
    SpinRate,
    PlateLocSide,
    PlateLocHeight,
    HorzBreak,
    InducedVertBreak,
    HorzApprAngle,
    VertApprAngle,
    PitchCall,
    Date,
    Time,
}

impl PitchColumn {
    pub const ALL: [PitchColumn; 14] = [
        PitchColumn::PitchNo,
        PitchColumn::Pitcher,
        PitchColumn::PitchType,
        PitchColumn::Velocity,
        PitchColumn::SpinRate,
        PitchColumn::PlateLocSide,
        PitchColumn::PlateLocHeight,
        PitchColumn::HorzBreak,
        PitchColumn::InducedVertBreak,
        PitchColumn::HorzApprAngle,
        PitchColumn::VertApprAngle,
        PitchColumn::PitchCall,
        PitchColumn::Date,
        PitchColumn::Time,
    ];

    /// Header name as written by the vendor.
    pub fn vendor_name(&self) -> &'static str {
        match self {
            PitchColumn::PitchNo => "PitchNo",
            PitchColumn::Pitcher => "Pitcher",
            PitchColumn::PitchType => "TaggedPitchType",
            PitchColumn::Velocity => "RelSpeed",
            PitchColumn::SpinRate => "SpinRate",
            PitchColumn::PlateLocSide => "PlateLocSide",
            PitchColumn::PlateLocHeight => "PlateLocHeight",
            PitchColumn::HorzBreak => "HorzBreak",
            PitchColumn::InducedVertBreak => "InducedVertBreak",
            PitchColumn::HorzApprAngle => "HorzApprAngle",
            PitchColumn::VertApprAngle => "VertApprAngle",
            PitchColumn::PitchCall => "PitchCall",
            PitchColumn::Date => "Date",
            PitchColumn::Time => "Time",
        }
    }

    /// Accepted header spellings, already normalized.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            PitchColumn::PitchNo => &["pitchno"],
            PitchColumn::Pitcher => &["pitcher"],
            PitchColumn::PitchType => &["taggedpitchtype", "pitchtype"],
            PitchColumn::Velocity => &["relspeed", "velocity", "velo"],
            PitchColumn::SpinRate => &["spinrate", "spin"],
            PitchColumn::PlateLocSide => &["platelocside"],
            PitchColumn::PlateLocHeight => &["platelocheight"],
            PitchColumn::HorzBreak => &["horzbreak", "hb"],
            PitchColumn::InducedVertBreak => &["inducedvertbreak", "ivb"],
            PitchColumn::HorzApprAngle => &["horzapprangle", "haa"],
            PitchColumn::VertApprAngle => &["vertapprangle", "vaa"],
            PitchColumn::PitchCall => &["pitchcall"],
            PitchColumn::Date => &["date"],
            PitchColumn::Time => &["time"],
        }
    }

    pub fn classify(header: &str) -> Option<PitchColumn> {
        let normalized = normalize_header(header);
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.aliases().contains(&normalized.as_str()))
    }
}

/// Maps each known column to its position in the header row.
#[derive(Debug, Default)]
pub(crate) struct ColumnIndex {
    positions: [Option<usize>; PitchColumn::ALL.len()],
}

impl ColumnIndex {
    pub fn from_header<'a>(header: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_header_with(header, PitchColumn::classify)
    }

    /// Builds the index with a format-specific header classifier.
    pub fn from_header_with<'a>(
        header: impl IntoIterator<Item = &'a str>,
        classify: impl Fn(&str) -> Option<PitchColumn>,
    ) -> Self {
        let mut index = ColumnIndex::default();
        for (position, name) in header.into_iter().enumerate() {
            let Some(column) = classify(name) else {
                continue;
            };
            // first spelling wins when an export repeats a column
            let slot = &mut index.positions[column as usize];
            if slot.is_none() {
                *slot = Some(position);
            }
        }
        index
    }

    pub fn get(&self, column: PitchColumn) -> Option<usize> {
        self.positions[column as usize]
    }

    pub fn contains(&self, column: PitchColumn) -> bool {
        self.get(column).is_some()
    }
}
