//! Small display-formatting helpers shared by the result views.

/// Distance with two decimals, e.g. `12.50 km`.
pub fn distance_km(value: f64) -> String {
	format!("{value:.2} km")
}

/// Edge-label distance with one decimal, e.g. `3.5 km`.
pub fn edge_km(value: f64) -> String {
	format!("{value:.1} km")
}

/// Currency with thousands grouping, e.g. `$12,500`.
pub fn currency(amount: f64) -> String {
	let negative = amount < 0.0;
	let whole = amount.abs().round() as u64;
	let digits = whole.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}
	if negative {
		format!("-${grouped}")
	} else {
		format!("${grouped}")
	}
}

/// Score/cost with two decimals, `N/A` when absent.
pub fn maybe_f64(value: Option<f64>) -> String {
	value
		.map(|v| format!("{v:.2}"))
		.unwrap_or_else(|| "N/A".into())
}

/// Cost with the currency sign, plain `N/A` when absent.
pub fn maybe_cost(value: Option<f64>) -> String {
	value
		.map(|v| format!("${v:.2}"))
		.unwrap_or_else(|| "N/A".into())
}

/// Yes/no flag rendering.
pub fn yes_no(value: bool) -> &'static str {
	if value { "Yes" } else { "No" }
}

/// Check-mark flag rendering for compact selector labels.
pub fn check_mark(value: bool) -> &'static str {
	if value { "✓" } else { "✗" }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distance_has_two_decimals() {
		assert_eq!(distance_km(12.5), "12.50 km");
		assert_eq!(edge_km(12.34), "12.3 km");
		assert_eq!(edge_km(12.38), "12.4 km");
	}

	#[test]
	fn currency_groups_thousands() {
		assert_eq!(currency(0.0), "$0");
		assert_eq!(currency(950.0), "$950");
		assert_eq!(currency(12500.0), "$12,500");
		assert_eq!(currency(1234567.0), "$1,234,567");
	}

	#[test]
	fn optional_values_fall_back_to_na() {
		assert_eq!(maybe_f64(Some(3.14159)), "3.14");
		assert_eq!(maybe_f64(None), "N/A");
	}

	#[test]
	fn absent_cost_omits_the_currency_sign() {
		assert_eq!(maybe_cost(Some(100.0)), "$100.00");
		assert_eq!(maybe_cost(None), "N/A");
	}
}
