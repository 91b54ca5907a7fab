use crate::model::application::{Ethnicity, PaymentMethod, Program, University};

/// certificates larger than this are refused, both client and server side
pub const MAX_CERTIFICATE_SIZE: usize = 5 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

pub const ALLOWED_MEDIA_TYPES: [&str; 4] = ["application/pdf", "image/jpeg", "image/jpg", "image/png"];

/// one of the two required uploaded documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
	See,
	PlusTwo,
}

impl Slot {
	pub const ALL: [Slot; 2] = [Slot::See, Slot::PlusTwo];

	/// multipart field name carrying this certificate
	pub fn field(&self) -> &'static str {
		match self {
			Slot::See => "seeCertificate",
			Slot::PlusTwo => "plusTwoCertificate",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Slot::See => "SEE",
			Slot::PlusTwo => "+2",
		}
	}

	pub fn from_field(field: &str) -> Option<Slot> {
		Slot::ALL.into_iter().find(|s| s.field() == field)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("missing required field: {0}")]
	MissingField(&'static str),

	#[error("missing required file: {} certificate", .0.label())]
	MissingFile(Slot),

	#[error("invalid {field}: {source}")]
	InvalidChoice {
		field: &'static str,
		source: crate::model::UnknownChoice,
	},

	#[error("invalid email address: '{0}'")]
	InvalidEmail(String),

	#[error("{} certificate must be a PDF, JPG, or PNG file", .0.label())]
	FileType(Slot),

	#[error("{} certificate must be less than 5MB", .0.label())]
	FileSize(Slot),

	#[error("{} certificate was uploaded more than once", .0.label())]
	DuplicateFile(Slot),
}

/// raw text fields as typed by the applicant
#[derive(Debug, Clone, Default)]
pub struct Form {
	pub name: Option<String>,
	pub email: Option<String>,
	pub citizenship_number: Option<String>,
	pub ethnicity: Option<String>,
	pub payment_method: Option<String>,
	pub university: Option<String>,
	pub program: Option<String>,
}

impl Form {
	/// multipart field names, in the order the form presents them
	pub const FIELDS: [&'static str; 7] = [
		"name", "email", "citizenshipNumber", "ethnicity", "paymentMethod", "university", "program",
	];

	/// assign a field by its multipart name, returns false for unknown names
	pub fn set(&mut self, field: &str, value: String) -> bool {
		let slot = match field {
			"name" => &mut self.name,
			"email" => &mut self.email,
			"citizenshipNumber" => &mut self.citizenship_number,
			"ethnicity" => &mut self.ethnicity,
			"paymentMethod" => &mut self.payment_method,
			"university" => &mut self.university,
			"program" => &mut self.program,
			_ => return false,
		};
		*slot = Some(value);
		true
	}

	pub fn get(&self, field: &str) -> Option<&str> {
		match field {
			"name" => self.name.as_deref(),
			"email" => self.email.as_deref(),
			"citizenshipNumber" => self.citizenship_number.as_deref(),
			"ethnicity" => self.ethnicity.as_deref(),
			"paymentMethod" => self.payment_method.as_deref(),
			"university" => self.university.as_deref(),
			"program" => self.program.as_deref(),
			_ => None,
		}
	}
}

/// an uploaded certificate, before it is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
	/// name of the file on the applicant's machine
	pub filename: String,
	pub media_type: Option<String>,
	pub data: Vec<u8>,
}

impl Certificate {
	/// lowercase extension of the original filename, if any
	pub fn extension(&self) -> Option<String> {
		extension(&self.filename)
	}

	pub fn check(&self, slot: Slot) -> Result<(), ValidationError> {
		check_extension(slot, &self.filename)?;
		check_size(slot, self.data.len())?;
		if let Some(media_type) = self.media_type.as_deref() {
			if !media_type_allowed(media_type) {
				return Err(ValidationError::FileType(slot));
			}
		}
		Ok(())
	}
}

pub fn extension(filename: &str) -> Option<String> {
	let (stem, ext) = filename.rsplit_once('.')?;
	if stem.is_empty() || ext.is_empty() {
		return None;
	}
	Some(ext.to_lowercase())
}

pub fn check_extension(slot: Slot, filename: &str) -> Result<(), ValidationError> {
	match extension(filename) {
		Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
		_ => Err(ValidationError::FileType(slot)),
	}
}

pub fn check_size(slot: Slot, size: usize) -> Result<(), ValidationError> {
	if size > MAX_CERTIFICATE_SIZE {
		Err(ValidationError::FileSize(slot))
	} else {
		Ok(())
	}
}

/// generic binary types defer to the extension check
fn media_type_allowed(media_type: &str) -> bool {
	let essence = media_type
		.split(';')
		.next()
		.unwrap_or_default()
		.trim()
		.to_lowercase();
	essence.is_empty()
		|| essence == "application/octet-stream"
		|| ALLOWED_MEDIA_TYPES.contains(&essence.as_str())
}

/// content type to declare for an allowed extension
pub fn media_type_for(extension: &str) -> &'static str {
	match extension.to_lowercase().as_str() {
		"pdf" => "application/pdf",
		"jpg" | "jpeg" => "image/jpeg",
		"png" => "image/png",
		_ => "application/octet-stream",
	}
}

/// everything collected from one submission attempt
#[derive(Debug, Clone, Default)]
pub struct Submission {
	pub form: Form,
	pub see: Option<Certificate>,
	pub plus_two: Option<Certificate>,
}

/// a submission which passed every rule, ready to be stored
#[derive(Debug, Clone)]
pub struct Application {
	pub name: String,
	pub email: String,
	pub citizenship_number: String,
	pub ethnicity: Ethnicity,
	pub payment_method: PaymentMethod,
	pub university: University,
	pub program: Program,
	pub see: Certificate,
	pub plus_two: Certificate,
}

impl Application {
	pub fn certificate(&self, slot: Slot) -> &Certificate {
		match slot {
			Slot::See => &self.see,
			Slot::PlusTwo => &self.plus_two,
		}
	}
}

impl Submission {
	pub fn certificate(&self, slot: Slot) -> Option<&Certificate> {
		match slot {
			Slot::See => self.see.as_ref(),
			Slot::PlusTwo => self.plus_two.as_ref(),
		}
	}

	pub fn certificate_mut(&mut self, slot: Slot) -> &mut Option<Certificate> {
		match slot {
			Slot::See => &mut self.see,
			Slot::PlusTwo => &mut self.plus_two,
		}
	}

	/// apply every intake rule, in form order: presence first, then values, then files
	pub fn validate(self) -> Result<Application, ValidationError> {
		for field in Form::FIELDS {
			if self.form.get(field).map_or(true, |x| x.trim().is_empty()) {
				return Err(ValidationError::MissingField(field));
			}
		}
		let see = self.see.ok_or(ValidationError::MissingFile(Slot::See))?;
		let plus_two = self.plus_two.ok_or(ValidationError::MissingFile(Slot::PlusTwo))?;
		let form = self.form;

		let email = required(form.email, "email")?;
		if !looks_like_email(&email) {
			return Err(ValidationError::InvalidEmail(email));
		}

		see.check(Slot::See)?;
		plus_two.check(Slot::PlusTwo)?;

		Ok(Application {
			name: required(form.name, "name")?,
			email,
			citizenship_number: required(form.citizenship_number, "citizenshipNumber")?,
			ethnicity: choice(form.ethnicity, "ethnicity")?,
			payment_method: choice(form.payment_method, "paymentMethod")?,
			university: choice(form.university, "university")?,
			program: choice(form.program, "program")?,
			see,
			plus_two,
		})
	}
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
	value
		.map(|x| x.trim().to_string())
		.filter(|x| !x.is_empty())
		.ok_or(ValidationError::MissingField(field))
}

fn choice<T>(value: Option<String>, field: &'static str) -> Result<T, ValidationError>
where
	T: for<'a> TryFrom<&'a str, Error = crate::model::UnknownChoice>,
{
	let value = required(value, field)?;
	T::try_from(value.as_str()).map_err(|source| ValidationError::InvalidChoice { field, source })
}

fn looks_like_email(email: &str) -> bool {
	match email.split_once('@') {
		Some((user, domain)) => !user.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(char::is_whitespace),
		None => false,
	}
}
