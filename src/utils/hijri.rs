/// Hijri month names in Turkish (index 0 = Muharrem = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharrem",
    "Safer",
    "Rebiülevvel",
    "Rebiülahir",
    "Cemaziyelevvel",
    "Cemaziyelahir",
    "Recep",
    "Şaban",
    "Ramazan",
    "Şevval",
    "Zilkade",
    "Zilhicce",
];

pub fn hijri_month_name(month: u32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(HIJRI_MONTH_NAMES[month as usize - 1])
    } else {
        None
    }
}
