use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, DbErr, EntityTrait, QueryOrder};

use crate::{
	model::application,
	storage,
	validate::{Slot, Submission, ValidationError},
};

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
	#[error("{0}")]
	Invalid(#[from] ValidationError),

	#[error("failed storing certificate: {0}")]
	Storage(#[from] std::io::Error),

	#[error("database error while storing application: {0}")]
	Database(#[from] DbErr),
}

#[async_trait::async_trait]
pub trait Intake {
	/// validate a submission, store both certificates and persist its record
	async fn submit(&self, submission: Submission) -> Result<application::Model, IntakeError>;

	/// every stored application, newest first
	async fn applications(&self) -> Result<Vec<application::Model>, DbErr>;
}

#[async_trait::async_trait]
impl Intake for crate::Context {
	async fn submit(&self, submission: Submission) -> Result<application::Model, IntakeError> {
		let application = submission.validate()?;

		let mut stored = Vec::with_capacity(Slot::ALL.len());
		for slot in Slot::ALL {
			match storage::store(self.uploads(), slot, application.certificate(slot)).await {
				Ok(filename) => stored.push(filename),
				Err(e) => {
					orphaned(self, &stored);
					return Err(e.into());
				},
			}
		}

		let model = application::ActiveModel {
			internal: NotSet,
			name: Set(application.name),
			email: Set(application.email),
			citizenship_number: Set(application.citizenship_number),
			ethnicity: Set(application.ethnicity),
			university: Set(application.university),
			program: Set(application.program),
			payment_method: Set(application.payment_method),
			payment_status: Set(application::PaymentStatus::Pending),
			see_certificate: Set(storage::reference(&stored[0])),
			plus_two_certificate: Set(storage::reference(&stored[1])),
			created_at: Set(chrono::Utc::now()),
		};

		match model.insert(self.db()).await {
			Ok(record) => {
				tracing::info!("received application #{} from {}", record.internal, record.email);
				Ok(record)
			},
			Err(e) => {
				// certificates are not rolled back, `cli orphans` sweeps them
				orphaned(self, &stored);
				Err(e.into())
			},
		}
	}

	async fn applications(&self) -> Result<Vec<application::Model>, DbErr> {
		application::Entity::find()
			.order_by_desc(application::Column::CreatedAt)
			.order_by_desc(application::Column::Internal)
			.all(self.db())
			.await
	}
}

fn orphaned(ctx: &crate::Context, filenames: &[String]) {
	for name in filenames {
		tracing::warn!("certificate left without application: {}", ctx.uploads().join(name).display());
	}
}

#[cfg(test)]
mod test {
	use scholar_migrations::MigratorTrait;
	use sea_orm::{ConnectOptions, Database, PaginatorTrait};

	use super::*;
	use crate::validate::{Certificate, Form};

	async fn context(dir: &std::path::Path) -> crate::Context {
		let mut opts = ConnectOptions::new("sqlite::memory:");
		opts.max_connections(1).min_connections(1);
		let db = Database::connect(opts).await.unwrap();
		scholar_migrations::Migrator::up(&db, None).await.unwrap();

		let mut config = crate::Config::default();
		config.files.path = dir.join("uploads").to_string_lossy().to_string();
		crate::Context::new(db, config).await.unwrap()
	}

	fn submission(name: &str, see_size: usize) -> Submission {
		let mut form = Form::default();
		form.set("name", name.into());
		form.set("email", "ram@example.com".into());
		form.set("citizenshipNumber", "12-34-56".into());
		form.set("ethnicity", "Dalit".into());
		form.set("paymentMethod", "eSewa".into());
		form.set("university", "Tribhuvan University".into());
		form.set("program", "Law".into());
		Submission {
			form,
			see: Some(Certificate { filename: "see.pdf".into(), media_type: None, data: vec![1; see_size] }),
			plus_two: Some(Certificate { filename: "plus-two.jpg".into(), media_type: None, data: vec![2; 64] }),
		}
	}

	#[tokio::test]
	async fn upload_directory_is_created() {
		let dir = tempfile::tempdir().unwrap();
		let ctx = context(dir.path()).await;
		assert!(ctx.uploads().is_dir());
	}

	#[tokio::test]
	async fn accepted_submission_is_stored_pending() {
		let dir = tempfile::tempdir().unwrap();
		let ctx = context(dir.path()).await;

		let record = ctx.submit(submission("Ram Thapa", 128)).await.unwrap();
		assert_eq!(record.payment_status, application::PaymentStatus::Pending);

		let see = ctx.resolve(&record.see_certificate).unwrap();
		let plus_two = ctx.resolve(&record.plus_two_certificate).unwrap();
		assert_eq!(std::fs::read(see).unwrap(), vec![1; 128]);
		assert_eq!(std::fs::read(plus_two).unwrap(), vec![2; 64]);
	}

	#[tokio::test]
	async fn rejected_submission_leaves_no_trace() {
		let dir = tempfile::tempdir().unwrap();
		let ctx = context(dir.path()).await;

		let err = ctx.submit(submission("Ram Thapa", 6 * 1024 * 1024)).await.unwrap_err();
		assert!(matches!(err, IntakeError::Invalid(ValidationError::FileSize(Slot::See))));

		assert_eq!(application::Entity::find().count(ctx.db()).await.unwrap(), 0);
		assert_eq!(std::fs::read_dir(ctx.uploads()).unwrap().count(), 0);
	}

	#[tokio::test]
	async fn listing_is_newest_first() {
		let dir = tempfile::tempdir().unwrap();
		let ctx = context(dir.path()).await;

		for name in ["first", "second", "third"] {
			ctx.submit(submission(name, 16)).await.unwrap();
		}

		let listed = ctx.applications().await.unwrap();
		let names : Vec<&str> = listed.iter().map(|x| x.name.as_str()).collect();
		assert_eq!(names, ["third", "second", "first"]);
		assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
	}
}
