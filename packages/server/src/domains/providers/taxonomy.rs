//! Maps human specialty labels and plan provider-type IDs to the federal
//! taxonomy codes the NPI registry filters by.

/// Specialty label -> NUCC taxonomy code, exact spellings first.
const SPECIALTY_CLASSIFICATIONS: &[(&str, &str)] = &[
    ("OB-GYN", "207V00000X"),
    ("OB/GYN", "207V00000X"),
    ("Obstetrics & Gynecology", "207V00000X"),
    ("Obstetrics and Gynecology", "207V00000X"),
    ("Gynecology", "207VG0400X"),
    ("Maternal & Fetal Medicine", "207VM0101X"),
    ("Certified Nurse Midwife", "367A00000X"),
    ("Midwife", "176B00000X"),
    ("Nurse Practitioner", "363L00000X"),
    ("Family Medicine", "207Q00000X"),
    ("Pediatrics", "208000000X"),
    ("Lactation Consultant", "174N00000X"),
    ("Doula", "374J00000X"),
];

/// Plan provider-type ID -> taxonomy code. These IDs are the health plan's
/// own category codes, unrelated to NUCC numbering.
const PROVIDER_TYPE_CLASSIFICATIONS: &[(&str, &str)] = &[
    ("20", "207Q00000X"), // physician, individual
    ("21", "207Q00000X"), // physician, group practice
    ("24", "363L00000X"), // advanced practice nurse
    ("38", "367A00000X"), // certified nurse midwife
    ("72", "208000000X"), // pediatric clinic
];

/// Resolve a specialty label and/or plan provider-type IDs to a taxonomy
/// code the registry understands.
///
/// Tried in order: exact label match, case-insensitive label match, substring
/// heuristics, then the provider-type table in the order the IDs were given.
/// None means "cannot filter by classification" and is not an error.
pub fn resolve_classification(
    specialty: Option<&str>,
    provider_type_ids: &[String],
) -> Option<&'static str> {
    if let Some(label) = specialty {
        for (known, code) in SPECIALTY_CLASSIFICATIONS {
            if *known == label {
                return Some(code);
            }
        }

        for (known, code) in SPECIALTY_CLASSIFICATIONS {
            if known.eq_ignore_ascii_case(label) {
                return Some(code);
            }
        }

        let lowered = label.to_lowercase();
        if lowered.contains("ob") && lowered.contains("gyn") {
            return Some("207V00000X");
        }
        if lowered.contains("midwife") {
            return Some("367A00000X");
        }
        if lowered.contains("nurse practitioner") {
            return Some("363L00000X");
        }
    }

    provider_type_ids.iter().find_map(|id| {
        PROVIDER_TYPE_CLASSIFICATIONS
            .iter()
            .find(|(known, _)| known == id)
            .map(|(_, code)| *code)
    })
}
