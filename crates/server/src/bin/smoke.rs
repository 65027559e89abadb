//! End-to-end smoke test against a running dictionary server
//!
//! Exits non-zero when fewer than 80% of the checks pass.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const OFFLINE_WORDS: &[&str] = &["hello", "book", "water", "food", "home", "love", "friend"];
const UNKNOWN_WORDS: &[&str] = &["serendipity", "ephemeral", "wanderlust"];
const STORAGE_WORD: &str = "happiness";
const AI_MISSING_BENGALI: &str = "অনুবাদ পাওয়া যায়নি";
const REQUIRED_FIELDS: &[&str] = &[
    "word",
    "bengaliTranslation",
    "pronunciation",
    "definition",
    "examples",
    "partOfSpeech",
    "source",
];

#[derive(Parser, Debug)]
#[command(name = "dictionary-smoke")]
#[command(about = "Exercise a running dictionary server over HTTP")]
struct Args {
    /// API base URL, including the /api prefix
    #[arg(long, env = "DICTIONARY_BASE_URL", default_value = "http://localhost:8001/api")]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

struct Smoke {
    client: Client,
    base_url: String,
    failures: Vec<String>,
}

impl Smoke {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn report(&mut self, name: &str, passed: bool, message: &str) -> bool {
        if passed {
            println!("PASS {}: {}", name, message);
        } else {
            println!("FAIL {}: {}", name, message);
            self.failures.push(format!("{}: {}", name, message));
        }
        passed
    }

    /// Run a check, turning transport errors into a failed result
    fn outcome(&mut self, name: &str, result: Result<bool>) -> bool {
        match result {
            Ok(passed) => passed,
            Err(e) => self.report(name, false, &format!("Error: {:#}", e)),
        }
    }

    async fn translate(&self, word: &str) -> Result<(StatusCode, Value)> {
        let response = self
            .client
            .post(self.url("/translate"))
            .json(&json!({ "word": word }))
            .send()
            .await
            .with_context(|| format!("POST /translate for '{}'", word))?;
        let status = response.status();
        let body = response.json().await.unwrap_or(Value::Null);
        Ok((status, body))
    }

    async fn health(&mut self) -> Result<bool> {
        let response = self.client.get(self.url("/")).send().await?;
        if response.status() != StatusCode::OK {
            return Ok(self.report("API Health Check", false, &format!("HTTP {}", response.status())));
        }
        let body: Value = response.json().await?;
        let ok = body["message"].as_str().is_some_and(|m| m.contains("Dictionary"));
        Ok(self.report("API Health Check", ok, "API is responding"))
    }

    async fn offline_words(&mut self) -> Result<bool> {
        let mut passed = 0;
        for word in OFFLINE_WORDS {
            let name = format!("Offline Translation - {}", word);
            let (status, body) = self.translate(word).await?;
            if status != StatusCode::OK {
                self.report(&name, false, &format!("HTTP {}", status));
                continue;
            }
            let missing: Vec<&str> = REQUIRED_FIELDS
                .iter()
                .copied()
                .filter(|f| body.get(f).is_none())
                .collect();
            if !missing.is_empty() {
                self.report(&name, false, &format!("Missing fields: {:?}", missing));
                continue;
            }
            let ok = body["source"] == "offline"
                && body["bengaliTranslation"].as_str().is_some_and(|t| !t.is_empty());
            if self.report(&name, ok, &format!("source={} bengali={}", body["source"], body["bengaliTranslation"])) {
                passed += 1;
            }
        }
        let ok = passed * 10 >= OFFLINE_WORDS.len() * 8;
        Ok(self.report(
            "Offline Dictionary Overall",
            ok,
            &format!("{}/{} offline words", passed, OFFLINE_WORDS.len()),
        ))
    }

    async fn unknown_words(&mut self) -> Result<bool> {
        let mut passed = 0;
        for word in UNKNOWN_WORDS {
            let name = format!("AI Translation - {}", word);
            let (status, body) = self.translate(word).await?;
            let bengali = body["bengaliTranslation"].as_str().unwrap_or_default();
            let ok = status == StatusCode::OK && !bengali.is_empty() && bengali != AI_MISSING_BENGALI;
            if self.report(&name, ok, &format!("source={} bengali={}", body["source"], bengali)) {
                passed += 1;
            }
        }
        Ok(self.report(
            "AI Enhanced Translation Overall",
            passed > 0,
            &format!("{}/{} unknown words", passed, UNKNOWN_WORDS.len()),
        ))
    }

    async fn storage(&mut self) -> Result<bool> {
        let (status, _) = self.translate(STORAGE_WORD).await?;
        if status != StatusCode::OK {
            return Ok(self.report("Database Storage", false, "Failed to create translation"));
        }

        tokio::time::sleep(Duration::from_secs(1)).await;

        let response = self.client.get(self.url("/translations?limit=10")).send().await?;
        if response.status() != StatusCode::OK {
            return Ok(self.report("Database Storage", false, &format!("HTTP {}", response.status())));
        }
        let records: Vec<Value> = response.json().await?;
        if records.is_empty() {
            return Ok(self.report("Database Storage", false, "No translations found"));
        }
        let found = records.iter().any(|r| {
            r["word"]
                .as_str()
                .is_some_and(|w| w.eq_ignore_ascii_case(STORAGE_WORD))
        });
        Ok(self.report(
            "Database Storage",
            true,
            &format!("{} recent translations, test word present: {}", records.len(), found),
        ))
    }

    async fn stats(&mut self) -> Result<bool> {
        let response = self.client.get(self.url("/dictionary/stats")).send().await?;
        if response.status() != StatusCode::OK {
            return Ok(self.report("Statistics Endpoint", false, &format!("HTTP {}", response.status())));
        }
        let body: Value = response.json().await?;
        let missing: Vec<&str> = ["total_translations", "offline_words", "ai_enhanced_translations"]
            .into_iter()
            .filter(|f| body.get(f).is_none())
            .collect();
        if !missing.is_empty() {
            return Ok(self.report("Statistics Endpoint", false, &format!("Missing: {:?}", missing)));
        }
        let offline = body["offline_words"].as_u64().unwrap_or(0);
        Ok(self.report(
            "Statistics Endpoint",
            offline >= 15,
            &format!("{} offline words, {} total", offline, body["total_translations"]),
        ))
    }

    async fn errors(&mut self) -> Result<bool> {
        let (status, _) = self.translate("").await?;
        let empty_ok = self.report(
            "Error Handling - Empty Word",
            status == StatusCode::BAD_REQUEST,
            &format!("HTTP {}", status),
        );

        let response = self
            .client
            .post(self.url("/translate"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("invalid json")
            .send()
            .await?;
        let status = response.status();
        let invalid_ok = self.report(
            "Error Handling - Invalid JSON",
            status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY,
            &format!("HTTP {}", status),
        );

        Ok(empty_ok && invalid_ok)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .context("building HTTP client")?;

    let mut smoke = Smoke {
        client,
        base_url: args.base_url,
        failures: Vec::new(),
    };

    println!("Testing API at: {}", smoke.base_url);
    println!("{}", "=".repeat(60));

    let mut results = Vec::new();
    let result = smoke.health().await;
    results.push(smoke.outcome("API Health Check", result));
    let result = smoke.offline_words().await;
    results.push(smoke.outcome("Offline Dictionary Overall", result));
    let result = smoke.unknown_words().await;
    results.push(smoke.outcome("AI Enhanced Translation Overall", result));
    let result = smoke.storage().await;
    results.push(smoke.outcome("Database Storage", result));
    let result = smoke.stats().await;
    results.push(smoke.outcome("Statistics Endpoint", result));
    let result = smoke.errors().await;
    results.push(smoke.outcome("Error Handling", result));

    let total = results.len();
    let passed = results.iter().filter(|r| **r).count();

    println!("{}", "=".repeat(60));
    println!("Total: {}  Passed: {}  Failed: {}", total, passed, total - passed);
    println!("Success rate: {:.1}%", passed as f64 * 100.0 / total as f64);

    if !smoke.failures.is_empty() {
        println!("\nFailed checks:");
        for failure in &smoke.failures {
            println!("  - {}", failure);
        }
    }

    if passed * 10 < total * 8 {
        bail!("{} of {} checks passed", passed, total);
    }
    Ok(())
}
