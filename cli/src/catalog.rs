/// Symptoms offered for selection. Anything else is accepted as free text.
pub const SYMPTOM_CATALOG: [&str; 10] = [
    "Pelvic and/or abdominal pain",
    "Increased frequency and/or urgency to pee",
    "Feelings of increased abdominal size or bloating",
    "Able to feel a lump in the abdomen",
    "Difficulty eating and/or feeling full quickly",
    "Increased fatigue",
    "Weight loss",
    "Menstrual/vaginal discharge irregularities or bleeding after menopause",
    "Pain and/or bleeding associated with intercourse",
    "Other (e.g., leg swelling, difficulty breathing, back pain)",
];

/// `"3"` picks the third catalog label; a case-insensitive label match is
/// normalized to the catalog spelling; anything else is kept as typed.
pub fn resolve_symptom(input: &str) -> String {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        if let Some(label) = n.checked_sub(1).and_then(|i| SYMPTOM_CATALOG.get(i)) {
            return label.to_string();
        }
    }
    SYMPTOM_CATALOG
        .iter()
        .find(|label| label.eq_ignore_ascii_case(input))
        .map(|label| label.to_string())
        .unwrap_or_else(|| input.to_string())
}
