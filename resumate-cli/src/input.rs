//! Loading the job description, resume and rubric from disk.

use anyhow::{anyhow, bail, Context, Result};
use resumate::Rubric;
use std::fs;
use std::path::Path;

pub fn read_job_description(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read job description '{}'", path.display()))
}

/// Read a resume, extracting the text layer of PDF files
pub fn read_resume(path: &Path) -> Result<String> {
    if is_pdf(path) {
        let bytes =
            fs::read(path).with_context(|| format!("failed to read resume '{}'", path.display()))?;
        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| anyhow!("PDF extraction failed for '{}': {}", path.display(), e))?;
        tracing::debug!("extracted {} characters from {}", text.len(), path.display());
        Ok(text.trim().to_string())
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read resume '{}'", path.display()))
    }
}

pub fn read_rubric(path: &Path) -> Result<Rubric> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read rubric '{}'", path.display()))?;
    Ok(Rubric::from_json(&json)?)
}

pub fn require_inputs(job_description: &str, resume_text: &str) -> Result<()> {
    if job_description.trim().is_empty() || resume_text.trim().is_empty() {
        bail!("provide both the job description and the resume");
    }
    Ok(())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
