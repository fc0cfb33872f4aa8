//! Sign-in and registration commands.

use std::path::{Path, PathBuf};

use mofresh_client::models::Attachment;

use super::{App, to_json};

/// Registration input from the command line.
pub struct Registration {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub documents: Vec<PathBuf>,
}

/// Sign in and log the session.
///
/// # Errors
///
/// Returns an error if validation or the login fails.
pub async fn login(app: &App, email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = app.flow.login(email, password).await?;
    tracing::info!(redirect = %dashboard, "Signed in");
    tracing::info!("{}", to_json(&app.flow.session().snapshot()));
    Ok(())
}

/// Sign in ahead of another command.
///
/// # Errors
///
/// Returns an error if validation or the login fails.
pub async fn sign_in(app: &App, email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = app.flow.login(email, password).await?;
    tracing::debug!(redirect = %dashboard, "Signed in");
    Ok(())
}

/// Register, then optionally resend and verify.
///
/// # Errors
///
/// Returns an error if a document cannot be read or any step fails.
pub async fn register(
    app: &App,
    form: Registration,
    resend: bool,
    otp: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = form
        .documents
        .iter()
        .map(|path| read_attachment(path))
        .collect::<Result<Vec<_>, _>>()?;

    let email = app
        .flow
        .register(&form.name, &form.phone, &form.email, &form.password, documents)
        .await?;
    tracing::info!(email = %email, "Registered; a verification code was sent");

    if resend {
        app.flow.resend_otp().await?;
        tracing::info!(email = %email, "Verification code re-sent");
    }

    if let Some(code) = otp {
        let dashboard = app.flow.verify_otp(code).await?;
        tracing::info!(redirect = %dashboard, "Verified");
        tracing::info!("{}", to_json(&app.flow.session().snapshot()));
    }
    Ok(())
}

fn read_attachment(path: &Path) -> Result<Attachment, std::io::Error> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "document".to_owned(), |name| name.to_string_lossy().into_owned());
    Ok(Attachment::new(file_name, content_type(path), bytes))
}

fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type(Path::new("id.PDF")), "application/pdf");
        assert_eq!(content_type(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(content_type(Path::new("licence")), "application/octet-stream");
    }
}
