use std::path::PathBuf;

pub mod submit;
pub use submit::submit;

pub mod browse;
pub use browse::browse;

pub mod render;
pub use render::{render, Listing};

#[cfg(test)]
mod test;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	#[error("{0}")]
	Invalid(#[from] scholar::validate::ValidationError),

	#[error("could not read certificate: {0}")]
	Io(#[from] std::io::Error),

	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("server answered {status}: {}", reason.as_deref().unwrap_or("no reason given"))]
	Rejected {
		status: reqwest::StatusCode,
		reason: Option<String>,
	},

	#[error("applications could not be loaded: {0}")]
	Unavailable(String),
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum ClientCommand {
	/// submit a scholarship application with both certificates
	Submit {
		/// portal to submit to, defaults to configured base url
		#[arg(long)]
		server: Option<String>,

		/// full name of the applicant
		#[arg(long)]
		name: Option<String>,

		#[arg(long)]
		email: Option<String>,

		#[arg(long)]
		citizenship_number: Option<String>,

		/// one of Janjati, Dalit, Disabled, women, Others
		#[arg(long)]
		ethnicity: Option<String>,

		/// one of eSewa, Khalti, Bank Transfer, PayPal
		#[arg(long)]
		payment_method: Option<String>,

		#[arg(long)]
		university: Option<String>,

		#[arg(long)]
		program: Option<String>,

		/// SEE certificate file: pdf, jpg, jpeg or png, at most 5MB
		#[arg(long)]
		see_certificate: Option<PathBuf>,

		/// +2 certificate file: pdf, jpg, jpeg or png, at most 5MB
		#[arg(long)]
		plus_two_certificate: Option<PathBuf>,
	},

	/// list submitted applications, newest first
	Browse {
		/// portal to browse, defaults to configured base url
		#[arg(long)]
		server: Option<String>,

		/// admin key, defaults to configured one
		#[arg(long, env = "SCHOLAR_ADMIN_KEY")]
		admin_key: Option<String>,

		/// offer to try again when loading fails
		#[arg(long, default_value_t = false)]
		retry: bool,
	},
}

pub async fn run(config: &scholar::Config, command: ClientCommand) -> Result<(), ClientError> {
	match command {
		ClientCommand::Submit {
			server, name, email, citizenship_number, ethnicity, payment_method, university, program,
			see_certificate, plus_two_certificate,
		} => {
			let server = server.unwrap_or_else(|| config.instance.base_url.clone());
			let form = scholar::validate::Form {
				name, email, citizenship_number, ethnicity, payment_method, university, program,
			};
			match submit(&server, form, see_certificate.as_deref(), plus_two_certificate.as_deref()).await {
				Ok(record) => {
					println!("{}", submit::confirmation(config, &record));
					Ok(())
				},
				Err(ClientError::Invalid(e)) => {
					eprintln!("{e}");
					Err(e.into())
				},
				Err(e) => {
					eprintln!("Failed to submit application. Please try again.\n{e}");
					Err(e)
				},
			}
		},

		ClientCommand::Browse { server, admin_key, retry } => {
			let server = server.unwrap_or_else(|| config.instance.base_url.clone());
			let admin_key = admin_key.or_else(|| Some(config.security.admin_key.clone()).filter(|x| !x.is_empty()));
			browse(&server, admin_key.as_deref(), retry).await
		},
	}
}
