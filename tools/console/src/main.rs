//! Interactive console client for the course API.
//!
//! Collects input field-by-field, applies the same validation and
//! sanitization rules as the server (shared through the `courseapi`
//! library), and issues the corresponding request over a TLS channel
//! trusting only the private CA certificate loaded at startup. Responses
//! are printed verbatim: status code, then body.

use std::env;
use std::fs;
use std::io::{self, Write};

use reqwest::Certificate;
use reqwest::blocking::Client;
use tracing::error;

use courseapi::models::Course;
use courseapi::validate::{code_matches, detail_matches, sanitize};

struct ApiClient {
    http: Client,
    base_url: String,
    key: String,
}

impl ApiClient {
    fn url(&self, code: Option<&str>) -> String {
        match code {
            Some(code) => format!("{}/{}?key={}", self.base_url, code, self.key),
            None => format!("{}?key={}", self.base_url, self.key),
        }
    }

    fn get_course(&self, code: Option<&str>) {
        let result = self.http.get(self.url(code)).send();
        print_response(result);
    }

    fn add_course(&self, code: &str, course: &Course) {
        let result = self.http.post(self.url(Some(code))).json(course).send();
        print_response(result);
    }

    fn update_course(&self, code: &str, course: &Course) {
        let result = self.http.put(self.url(Some(code))).json(course).send();
        print_response(result);
    }

    fn delete_course(&self, code: &str) {
        let result = self.http.delete(self.url(Some(code))).send();
        print_response(result);
    }
}

/// Print status code and raw body with no further interpretation.
fn print_response(result: reqwest::Result<reqwest::blocking::Response>) {
    match result {
        Ok(response) => {
            println!("{}", response.status().as_u16());
            match response.text() {
                Ok(body) => println!("{body}"),
                Err(e) => error!("failed to read response body: {e}"),
            }
        }
        Err(e) => {
            println!("The HTTP request failed with error {e}");
            error!("http request failed: {e}");
        }
    }
}

fn read_line(prompt: &str) -> String {
    println!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim_end_matches(['\r', '\n']).to_string()
}

/// Prompt for a course code; rejects anything that is not all digits.
fn prompt_code(prompt: &str) -> Option<String> {
    let code = read_line(prompt);
    if code.is_empty() || !code_matches(&code) {
        error!("incorrect input format for course code");
        return None;
    }
    Some(sanitize(&code))
}

/// Prompt for a free-text field. On update, an empty line means "no
/// change" and is passed through as the empty sentinel.
fn prompt_detail(prompt: &str, allow_empty: bool) -> Option<String> {
    let value = read_line(prompt);
    if value.is_empty() {
        if allow_empty {
            return Some(value);
        }
        error!("field must not be empty");
        return None;
    }
    if !detail_matches(&value) {
        error!("incorrect input format for field");
        return None;
    }
    Some(sanitize(&value))
}

fn collect_course(code: &str, allow_empty: bool) -> Option<Course> {
    let code_num = match code.parse() {
        Ok(v) => v,
        Err(_) => {
            error!("course code out of range");
            return None;
        }
    };

    let suffix = if allow_empty { " Press enter if no change." } else { "" };
    Some(Course {
        code: code_num,
        title: prompt_detail(&format!("Please enter course title.{suffix}"), allow_empty)?,
        dates: prompt_detail(&format!("Please enter course dates.{suffix}"), allow_empty)?,
        lecturer: prompt_detail(&format!("Please enter lecturer name.{suffix}"), allow_empty)?,
        description: prompt_detail(
            &format!("Please enter course description.{suffix}"),
            allow_empty,
        )?,
    })
}

fn create_action(client: &ApiClient) {
    println!("Please enter the following details:");
    let Some(code) = prompt_code("Please enter course code") else {
        return;
    };
    let Some(course) = collect_course(&code, false) else {
        return;
    };
    client.add_course(&code, &course);
}

fn read_action(client: &ApiClient) {
    println!("Please select from the following");
    println!("1. Get all courses.");
    println!("2. Get specific course.");

    match read_line("").as_str() {
        "1" => client.get_course(None),
        "2" => {
            if let Some(code) = prompt_code("Please enter course code:") {
                client.get_course(Some(&code));
            }
        }
        _ => println!("You did not make a valid selection, please try again."),
    }
}

fn update_action(client: &ApiClient) {
    println!("Please enter the following details:");
    let Some(code) = prompt_code("Please enter course code") else {
        return;
    };
    let Some(course) = collect_course(&code, true) else {
        return;
    };
    client.update_course(&code, &course);
}

fn delete_action(client: &ApiClient) {
    if let Some(code) = prompt_code("Please enter course code to delete.") {
        client.delete_course(&code);
    }
}

fn menu(client: &ApiClient) {
    loop {
        println!("===============================");
        println!("Welcome to API client console");
        println!("===============================");
        println!("Please select 1 of the following URL queries:");
        println!(" c - Create");
        println!(" r - Read");
        println!(" u - Update");
        println!(" d - Delete");
        println!(" e - Exit Console");
        println!(" Please make a selection and hit enter.");

        match read_line("").as_str() {
            "c" => create_action(client),
            "r" => read_action(client),
            "u" => update_action(client),
            "d" => delete_action(client),
            "e" => {
                println!("Exiting the program..");
                return;
            }
            _ => println!("You did not make a valid section. Please try again."),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "console=info".to_string()),
        ))
        .init();

    dotenvy::dotenv().ok();
    let key = env::var("API_KEY")?;
    let base_url = env::var("BASE_URL")
        .unwrap_or_else(|_| "https://localhost:5000/api/v1/courses".to_string());
    let ca_path = env::var("CA_CERT").unwrap_or_else(|_| "certs/ca.crt".to_string());

    // Trust only the private CA; the default roots stay out of the pool.
    let ca = Certificate::from_pem(&fs::read(&ca_path)?)?;
    let http = Client::builder().tls_certs_only([ca]).build()?;

    let client = ApiClient {
        http,
        base_url,
        key,
    };

    menu(&client);
    Ok(())
}
