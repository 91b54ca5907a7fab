
use scholar::model::application;

/// outcome of loading the application listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
	Loaded(Vec<application::Model>),
	Failed(String),
}

pub const EMPTY_VIEW: &str = "No applications found.";

const HEADERS: [&str; 12] = [
	"#", "Submitted", "Name", "Email", "Citizenship No.", "University", "Program",
	"Ethnicity", "Payment", "Status", "SEE Certificate", "+2 Certificate",
];

/// one row per record in server order, certificate links resolved against `base`
pub fn render(listing: &Listing, base: &str) -> String {
	match listing {
		Listing::Failed(reason) => format!("Failed to load applications: {reason}\nPlease try again."),
		Listing::Loaded(records) if records.is_empty() => EMPTY_VIEW.to_string(),
		Listing::Loaded(records) => table(records, base),
	}
}

fn row(record: &application::Model, base: &str) -> [String; 12] {
	[
		record.internal.to_string(),
		local_date(&record.created_at),
		record.name.clone(),
		record.email.clone(),
		record.citizenship_number.clone(),
		record.university.as_ref().to_string(),
		record.program.as_ref().to_string(),
		record.ethnicity.as_ref().to_string(),
		record.payment_method.as_ref().to_string(),
		record.payment_status.as_ref().to_string(),
		scholar::storage::url(base, &record.see_certificate),
		scholar::storage::url(base, &record.plus_two_certificate),
	]
}

pub fn local_date(date: &chrono::DateTime<chrono::Utc>) -> String {
	date.with_timezone(&chrono::Local).format("%d %b %Y, %H:%M").to_string()
}

fn table(records: &[application::Model], base: &str) -> String {
	let rows: Vec<[String; 12]> = records.iter().map(|r| row(r, base)).collect();

	let mut widths = HEADERS.map(|h| h.chars().count());
	for row in &rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.chars().count());
		}
	}

	let mut out = String::new();
	line(&mut out, &HEADERS.map(str::to_string), &widths);
	let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
	line(&mut out, &rule, &widths);
	for row in &rows {
		line(&mut out, row, &widths);
	}
	out.push_str(&format!("{} application(s)", rows.len()));
	out
}

fn line(out: &mut String, cells: &[String], widths: &[usize]) {
	let padded: Vec<String> = cells
		.iter()
		.zip(widths)
		.map(|(cell, &width)| format!("{cell:<width$}"))
		.collect();
	out.push_str(padded.join(" | ").trim_end());
	out.push('\n');
}
