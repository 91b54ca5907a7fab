use scholar::{
	model::application::{self, Ethnicity, PaymentMethod, PaymentStatus, Program, University},
	validate::{Form, Slot, ValidationError},
};
use scholar_migrations::MigratorTrait;
use sea_orm::{ConnectOptions, Database};

use crate::{render, ClientError, Listing};

const ADMIN_KEY: &str = "client-test-key";

fn record(internal: i64, name: &str) -> application::Model {
	application::Model {
		internal,
		name: name.to_string(),
		email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
		citizenship_number: "12-34-56".into(),
		ethnicity: Ethnicity::Dalit,
		university: University::Kathmandu,
		program: Program::Medicine,
		payment_method: PaymentMethod::BankTransfer,
		payment_status: PaymentStatus::Pending,
		see_certificate: format!("/uploads/seeCertificate-{internal}-1.pdf"),
		plus_two_certificate: format!("/uploads/plusTwoCertificate-{internal}-2.png"),
		created_at: chrono::DateTime::from_timestamp(1_700_000_000 + internal, 0).unwrap(),
	}
}

fn form() -> Form {
	let mut form = Form::default();
	for (field, value) in [
		("name", "Ram Thapa"),
		("email", "ram@example.com"),
		("citizenshipNumber", "12-34-56"),
		("ethnicity", "Dalit"),
		("paymentMethod", "eSewa"),
		("university", "Tribhuvan University"),
		("program", "Law"),
	] {
		form.set(field, value.to_string());
	}
	form
}

#[test]
fn empty_and_failed_listings_render_differently() {
	let empty = render(&Listing::Loaded(vec![]), "http://localhost:5000");
	let failed = render(&Listing::Failed("connection refused".into()), "http://localhost:5000");
	assert_eq!(empty, crate::render::EMPTY_VIEW);
	assert!(failed.contains("connection refused"));
	assert!(failed.contains("try again"));
	assert_ne!(empty, failed);
}

#[test]
fn table_keeps_server_order_and_links_certificates() {
	let view = render(
		&Listing::Loaded(vec![record(2, "Sita Rai"), record(1, "Hari Gurung")]),
		"http://localhost:5000/",
	);
	let lines: Vec<&str> = view.lines().collect();
	assert!(lines[0].starts_with("#"));
	assert!(lines[2].contains("Sita Rai"));
	assert!(lines[3].contains("Hari Gurung"));
	assert!(lines[2].contains("http://localhost:5000/uploads/seeCertificate-2-1.pdf"));
	assert!(lines[2].contains("http://localhost:5000/uploads/plusTwoCertificate-2-2.png"));
	assert!(lines[2].contains("Bank Transfer"));
	assert!(lines[2].contains(&crate::render::local_date(&record(2, "Sita Rai").created_at)));
	assert_eq!(lines.last(), Some(&"2 application(s)"));
}

#[test]
fn confirmation_shows_payment_instructions() {
	let text = crate::submit::confirmation(&scholar::Config::default(), &record(1, "Sita Rai"));
	assert!(text.starts_with("Application Submitted!"));
	assert!(text.contains("NPR 500 payment via Bank Transfer"));
	assert!(text.contains("Account: Scholarship Portal"));
	assert!(text.contains("Reference: Your Email (sita.rai@example.com)"));
}

#[tokio::test]
async fn oversized_certificate_is_refused_before_reading() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("see.pdf");
	std::fs::File::create(&path).unwrap().set_len(6 * 1024 * 1024).unwrap();

	let err = crate::submit::load(Slot::See, &path).await.unwrap_err();
	assert!(matches!(err, ClientError::Invalid(ValidationError::FileSize(Slot::See))));
	assert_eq!(err.to_string(), "SEE certificate must be less than 5MB");
}

#[tokio::test]
async fn unsupported_certificate_is_refused() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("marks.docx");
	std::fs::write(&path, b"not a certificate").unwrap();

	let err = crate::submit::load(Slot::PlusTwo, &path).await.unwrap_err();
	assert!(matches!(err, ClientError::Invalid(ValidationError::FileType(Slot::PlusTwo))));
}

async fn spawn_portal(uploads: &std::path::Path) -> String {
	let mut opts = ConnectOptions::new("sqlite::memory:");
	opts.max_connections(1).min_connections(1);
	let db = Database::connect(opts).await.unwrap();
	scholar_migrations::Migrator::up(&db, None).await.unwrap();

	let mut config = scholar::Config::default();
	config.files.path = uploads.to_string_lossy().to_string();
	config.security.admin_key = ADMIN_KEY.to_string();
	let ctx = scholar::Context::new(db, config).await.unwrap();

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, scholar_routes::router(ctx)).await.unwrap();
	});
	format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn submitted_application_shows_up_in_listing() {
	let dir = tempfile::tempdir().unwrap();
	let server = spawn_portal(&dir.path().join("uploads")).await;

	let see = dir.path().join("see.pdf");
	let plus_two = dir.path().join("plus-two.jpg");
	std::fs::write(&see, vec![b'S'; 2 * 1024 * 1024]).unwrap();
	std::fs::write(&plus_two, vec![b'P'; 1024 * 1024]).unwrap();

	let listing = crate::browse::listing(&server, Some(ADMIN_KEY)).await;
	assert_eq!(listing, Listing::Loaded(vec![]));
	assert_eq!(render(&listing, &server), crate::render::EMPTY_VIEW);

	let created = crate::submit(&server, form(), Some(&see), Some(&plus_two)).await.unwrap();
	assert_eq!(created.payment_status, PaymentStatus::Pending);
	assert_eq!(created.university, University::Tribhuvan);

	let listed = crate::browse::fetch(&server, Some(ADMIN_KEY)).await.unwrap();
	assert_eq!(listed, vec![created.clone()]);

	let stored = reqwest::get(format!("{server}{}", created.see_certificate)).await.unwrap();
	assert!(stored.status().is_success());
	assert_eq!(stored.bytes().await.unwrap().to_vec(), vec![b'S'; 2 * 1024 * 1024]);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_certificate_never_reaches_the_server() {
	let dir = tempfile::tempdir().unwrap();
	let server = spawn_portal(&dir.path().join("uploads")).await;
	let see = dir.path().join("see.png");
	std::fs::write(&see, b"png bytes").unwrap();

	let err = crate::submit(&server, form(), Some(&see), None).await.unwrap_err();
	assert!(matches!(err, ClientError::Invalid(ValidationError::MissingFile(Slot::PlusTwo))));

	let listed = crate::browse::fetch(&server, Some(ADMIN_KEY)).await.unwrap();
	assert!(listed.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn refused_listing_surfaces_reason() {
	let dir = tempfile::tempdir().unwrap();
	let server = spawn_portal(&dir.path().join("uploads")).await;

	let err = crate::browse::fetch(&server, Some("wrong")).await.unwrap_err();
	assert!(matches!(err, ClientError::Rejected { status, .. } if status == reqwest::StatusCode::FORBIDDEN));

	let listing = crate::browse::listing(&server, None).await;
	assert!(matches!(listing, Listing::Failed(_)));
}
