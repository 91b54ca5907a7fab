use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::validate::{Certificate, Slot};

/// public route prefix under which stored certificates are served
pub const UPLOADS_ROUTE: &str = "/uploads/";

/// `<field>-<epoch millis>-<random>.<ext>`, unique without coordinating with concurrent uploads
pub fn stored_filename(slot: Slot, extension: &str) -> String {
	format!(
		"{}-{}-{}.{extension}",
		slot.field(),
		chrono::Utc::now().timestamp_millis(),
		rand::random_range(0..1_000_000_000u32),
	)
}

/// reference kept in application records for a stored filename
pub fn reference(filename: &str) -> String {
	format!("{UPLOADS_ROUTE}{filename}")
}

/// bare stored filename out of a record reference
pub fn filename(reference: &str) -> Option<&str> {
	reference
		.strip_prefix(UPLOADS_ROUTE)
		.filter(|x| is_plain_filename(x))
}

pub fn url(base: &str, reference: &str) -> String {
	format!("{}{reference}", base.trim_end_matches('/'))
}

/// refuses anything which could escape the upload directory
pub fn is_plain_filename(name: &str) -> bool {
	!name.is_empty()
		&& name != "."
		&& name != ".."
		&& !name.contains(['/', '\\', '\0'])
}

/// write a validated certificate into the upload directory, returns its stored filename
pub async fn store(dir: &Path, slot: Slot, certificate: &Certificate) -> Result<String, std::io::Error> {
	let extension = certificate.extension().unwrap_or_else(|| "bin".to_string());
	let filename = stored_filename(slot, &extension);
	let path = dir.join(&filename);

	let mut file = tokio::fs::OpenOptions::new()
		.write(true)
		.create_new(true)
		.open(&path)
		.await?;
	file.write_all(&certificate.data).await?;
	file.flush().await?;

	tracing::debug!("stored {} certificate '{}' as {}", slot.label(), certificate.filename, path.display());
	Ok(filename)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn stored_filenames_keep_field_and_extension() {
		let name = stored_filename(Slot::PlusTwo, "jpg");
		let (stem, ext) = name.rsplit_once('.').unwrap();
		assert_eq!(ext, "jpg");
		let mut parts = stem.split('-');
		assert_eq!(parts.next(), Some("plusTwoCertificate"));
		assert!(parts.next().unwrap().parse::<i64>().is_ok());
		assert!(parts.next().unwrap().parse::<u32>().unwrap() < 1_000_000_000);
		assert_eq!(parts.next(), None);
	}

	#[test]
	fn references_round_trip_to_filenames() {
		let reference = reference("seeCertificate-1-2.pdf");
		assert_eq!(reference, "/uploads/seeCertificate-1-2.pdf");
		assert_eq!(filename(&reference), Some("seeCertificate-1-2.pdf"));
		assert_eq!(url("http://localhost:5000/", &reference), "http://localhost:5000/uploads/seeCertificate-1-2.pdf");
	}

	#[test]
	fn traversal_is_refused() {
		assert_eq!(filename("/uploads/../secrets.toml"), None);
		assert_eq!(filename("/uploads/.."), None);
		assert_eq!(filename("/elsewhere/file.pdf"), None);
		assert!(!is_plain_filename("a\\b.pdf"));
		assert!(is_plain_filename("seeCertificate-1-2.pdf"));
	}

	#[tokio::test]
	async fn stored_certificate_keeps_its_bytes() {
		let dir = tempfile::tempdir().unwrap();
		let certificate = Certificate {
			filename: "Marksheet.PDF".into(),
			media_type: Some("application/pdf".into()),
			data: b"%PDF-1.4 not really".to_vec(),
		};
		let name = store(dir.path(), Slot::See, &certificate).await.unwrap();
		assert!(name.starts_with("seeCertificate-"));
		assert!(name.ends_with(".pdf"));
		assert_eq!(tokio::fs::read(dir.path().join(name)).await.unwrap(), certificate.data);
	}
}
