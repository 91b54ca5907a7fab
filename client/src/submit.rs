use std::path::Path;

use scholar::{
	model::application,
	validate::{self, Application, Certificate, Form, Slot, Submission},
};

use crate::ClientError;

/// validate locally, then send the whole application as one multipart request
///
/// nothing is retried: on any failure the applicant has to submit again
pub async fn submit(
	server: &str,
	form: Form,
	see: Option<&Path>,
	plus_two: Option<&Path>,
) -> Result<application::Model, ClientError> {
	let mut submission = Submission { form, see: None, plus_two: None };
	for (slot, path) in [(Slot::See, see), (Slot::PlusTwo, plus_two)] {
		if let Some(path) = path {
			*submission.certificate_mut(slot) = Some(load(slot, path).await?);
		}
	}
	let application = submission.validate()?;

	let url = format!("{}/api/applications", server.trim_end_matches('/'));
	tracing::debug!("submitting application for {} to {url}", application.email);

	let res = reqwest::Client::new()
		.post(url)
		.multipart(encode(&application)?)
		.send()
		.await?;

	if !res.status().is_success() {
		return Err(rejection(res).await);
	}

	Ok(res.json().await?)
}

/// read a certificate from disk, refusing oversized files before loading them
pub async fn load(slot: Slot, path: &Path) -> Result<Certificate, ClientError> {
	let size = tokio::fs::metadata(path).await?.len();
	validate::check_size(slot, usize::try_from(size).unwrap_or(usize::MAX))?;

	let filename = path
		.file_name()
		.map(|x| x.to_string_lossy().to_string())
		.unwrap_or_default();
	validate::check_extension(slot, &filename)?;

	let media_type = validate::extension(&filename)
		.map(|ext| validate::media_type_for(&ext).to_string());
	let data = tokio::fs::read(path).await?;

	Ok(Certificate { filename, media_type, data })
}

/// multipart body with the field names the intake endpoint expects
pub fn encode(application: &Application) -> Result<reqwest::multipart::Form, reqwest::Error> {
	let mut form = reqwest::multipart::Form::new()
		.text("name", application.name.clone())
		.text("email", application.email.clone())
		.text("citizenshipNumber", application.citizenship_number.clone())
		.text("ethnicity", application.ethnicity.as_ref().to_string())
		.text("paymentMethod", application.payment_method.as_ref().to_string())
		.text("university", application.university.as_ref().to_string())
		.text("program", application.program.as_ref().to_string());

	for slot in Slot::ALL {
		let certificate = application.certificate(slot);
		let mut part = reqwest::multipart::Part::bytes(certificate.data.clone())
			.file_name(certificate.filename.clone());
		if let Some(media_type) = certificate.media_type.as_deref() {
			part = part.mime_str(media_type)?;
		}
		form = form.part(slot.field(), part);
	}

	Ok(form)
}

pub(crate) async fn rejection(res: reqwest::Response) -> ClientError {
	let status = res.status();
	let reason = res
		.json::<serde_json::Value>()
		.await
		.ok()
		.and_then(|body| body.get("description")?.as_str().map(str::to_string));
	ClientError::Rejected { status, reason }
}

/// what the applicant sees once the portal accepted the application
pub fn confirmation(config: &scholar::Config, record: &application::Model) -> String {
	format!(
		"Application Submitted!\n\
		Thank you for your application. We'll review your information and get back to you soon.\n\
		\n\
		Payment Instructions\n\
		Please complete your NPR {} payment via {} to:\n  \
		- Account: {}\n  \
		- Reference: Your Email ({})\n",
		config.instance.service_fee,
		record.payment_method.as_ref(),
		config.instance.payment_account,
		record.email,
	)
}
