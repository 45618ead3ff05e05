/// First-level administrative regions as spelled by the registry.
pub const VOIVODESHIPS: [&str; 16] = [
    "mazowieckie",
    "wielkopolskie",
    "malopolskie",
    "slaskie",
    "lubelskie",
    "dolnoslaskie",
    "podkarpackie",
    "lodzkie",
    "zachodniopomorskie",
    "kujawsko-pomorskie",
    "pomorskie",
    "warminsko-mazurskie",
    "swietokrzyskie",
    "podlaskie",
    "opolskie",
    "lubuskie",
];

#[must_use]
pub fn is_known(voivodeship: &str) -> bool {
    VOIVODESHIPS.iter().any(|known| known.eq_ignore_ascii_case(voivodeship.trim()))
}
