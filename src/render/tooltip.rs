use crate::data::model::CountryRecord;

/// Group an integer with `,` thousands separators.
pub fn format_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Uppercase the first character.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Hover text describing one country: name, continent, life expectancy, GDP and population.
pub fn tooltip_text(record: &CountryRecord) -> String {
    let income = if record.income.is_finite() && record.income >= 0.0 {
        format!("${}", format_thousands(record.income.round() as u64))
    } else {
        format!("${:.0}", record.income)
    };
    format!(
        "Country: {}\nContinent: {}\nLife Expectancy: {:.2}\nGDP Per Capita: {}\nPopulation: {}",
        record.country,
        capitalize(record.continent.as_str()),
        record.life_exp,
        income,
        format_thousands(record.population),
    )
}
