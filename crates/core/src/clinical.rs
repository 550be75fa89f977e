//! Clinical context the clinician confirms before a QA session starts.

use serde::{Deserialize, Serialize};

use crate::Sex;

/// Treatment delivery technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technique {
    /// Conformal 3D
    ThreeD,
    /// Intensity-modulated radiotherapy
    Imrt,
    /// Volumetric modulated arc therapy
    Vmat,
    /// Stereotactic radiosurgery
    Srs,
    /// Stereotactic body radiotherapy
    Sbrt,
    /// Field-in-field
    Fif,
}

impl Technique {
    /// All techniques, in plan-name detection priority order.
    pub const ALL: [Technique; 6] = [
        Self::ThreeD,
        Self::Imrt,
        Self::Vmat,
        Self::Srs,
        Self::Sbrt,
        Self::Fif,
    ];

    /// Display label; also the token searched for inside plan names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ThreeD => "3D",
            Self::Imrt => "IMRT",
            Self::Vmat => "VMAT",
            Self::Srs => "SRS",
            Self::Sbrt => "SBRT",
            Self::Fif => "FIF",
        }
    }

    /// Parse from a label such as `VMAT` (trimmed, case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|t| raw.eq_ignore_ascii_case(t.label()))
    }

    /// Whether this is a modulated technique subject to complexity rules.
    pub fn is_modulated(&self) -> bool {
        matches!(self, Self::Imrt | Self::Vmat)
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Anatomic region treated by the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnatomicRegion {
    /// Breast
    Breast,
    /// Colon or rectum
    ColonRectum,
    /// Lung
    Lung,
    /// Prostate
    Prostate,
    /// Cervix or uterus
    CervixUterus,
    /// Esophagus
    Esophagus,
    /// Head and neck
    HeadNeck,
    /// Pancreas
    Pancreas,
    /// Bladder
    Bladder,
    /// Brain or central nervous system
    BrainCns,
    /// Limbs
    Limbs,
    /// Any other region
    Other,
}

impl AnatomicRegion {
    /// All regions offered to the clinician.
    pub const ALL: [AnatomicRegion; 12] = [
        Self::Breast,
        Self::ColonRectum,
        Self::Lung,
        Self::Prostate,
        Self::CervixUterus,
        Self::Esophagus,
        Self::HeadNeck,
        Self::Pancreas,
        Self::Bladder,
        Self::BrainCns,
        Self::Limbs,
        Self::Other,
    ];

    /// Display label; also the token matched against plan names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Breast => "BREAST",
            Self::ColonRectum => "COLON/RECTUM",
            Self::Lung => "LUNG",
            Self::Prostate => "PROSTATE",
            Self::CervixUterus => "CERVIX/UTERUS",
            Self::Esophagus => "ESOPHAGUS",
            Self::HeadNeck => "HEAD&NECK",
            Self::Pancreas => "PANCREAS",
            Self::Bladder => "BLADDER",
            Self::BrainCns => "BRAIN/CNS",
            Self::Limbs => "LIMBS",
            Self::Other => "OTHER",
        }
    }

    /// Parse from a label (trimmed, case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|r| raw.eq_ignore_ascii_case(r.label()))
    }

    /// Whether plans in this region are assumed to face anatomic changes
    /// over the treatment course.
    pub fn implies_anatomic_changes(&self) -> bool {
        matches!(
            self,
            Self::ColonRectum | Self::Lung | Self::CervixUterus | Self::HeadNeck
        )
    }
}

impl std::fmt::Display for AnatomicRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Clinician-confirmed plan context, frozen once a QA session starts.
///
/// The anatomic-changes flag is derived from the region on construction
/// and re-derived by [`ClinicalContext::set_region`], which overwrites any
/// manual edit. A direct field write remains possible afterwards for an
/// explicit clinician override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalContext {
    /// Delivery technique
    pub technique: Technique,

    /// Anatomic region
    pub region: AnatomicRegion,

    /// Anatomic changes expected over the treatment course
    pub anatomic_changes: bool,

    /// Pediatric patient
    pub pediatric: bool,

    /// Patient sex
    pub sex: Sex,
}

impl ClinicalContext {
    /// Create a context, deriving the anatomic-changes flag from the region.
    pub fn new(technique: Technique, region: AnatomicRegion, pediatric: bool, sex: Sex) -> Self {
        Self {
            technique,
            region,
            anatomic_changes: region.implies_anatomic_changes(),
            pediatric,
            sex,
        }
    }

    /// Change the region and re-derive the anatomic-changes flag.
    pub fn set_region(&mut self, region: AnatomicRegion) {
        self.region = region;
        self.anatomic_changes = region.implies_anatomic_changes();
    }

    /// Whether the first-attempt package gets the Transit-EPID addition.
    pub fn escalation_flag(&self) -> bool {
        self.anatomic_changes || self.pediatric
    }
}
