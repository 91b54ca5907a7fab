use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

use scholar::model::application;

use crate::{render, ClientError, Listing};

pub async fn fetch(server: &str, admin_key: Option<&str>) -> Result<Vec<application::Model>, ClientError> {
	let mut req = reqwest::Client::new()
		.get(format!("{}/api/applications", server.trim_end_matches('/')));
	if let Some(key) = admin_key {
		req = req.header("X-Admin-Key", key);
	}

	let res = req.send().await?;
	if !res.status().is_success() {
		return Err(crate::submit::rejection(res).await);
	}

	Ok(res.json().await?)
}

pub async fn listing(server: &str, admin_key: Option<&str>) -> Listing {
	match fetch(server, admin_key).await {
		Ok(records) => Listing::Loaded(records),
		Err(e) => {
			tracing::debug!("failed loading applications: {e}");
			Listing::Failed(e.to_string())
		},
	}
}

pub async fn browse(server: &str, admin_key: Option<&str>, retry: bool) -> Result<(), ClientError> {
	loop {
		let listing = listing(server, admin_key).await;
		println!("{}", render(&listing, server));

		match listing {
			Listing::Loaded(_) => return Ok(()),
			Listing::Failed(reason) => {
				if retry && ask_retry().await? {
					continue;
				}
				return Err(ClientError::Unavailable(reason));
			},
		}
	}
}

async fn ask_retry() -> Result<bool, std::io::Error> {
	let mut stdout = tokio::io::stdout();
	stdout.write_all(b"retry? [Y/n] ").await?;
	stdout.flush().await?;

	let mut answer = String::new();
	if tokio::io::BufReader::new(tokio::io::stdin()).read_line(&mut answer).await? == 0 {
		return Ok(false);
	}
	let answer = answer.trim().to_lowercase();
	Ok(answer.is_empty() || answer.starts_with('y'))
}
