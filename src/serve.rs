//! HTTP server for interactive verification mode
//!
//! `verinote serve ./scans` → starts server, opens browser, shows verdicts

use crate::analyzer::{AnalysisResult, Analyzer};
use crate::catalog::Catalog;
use crate::explain;
use crate::report::Summary;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tiny_http::{Header, Method, Request, Response, Server};
use walkdir::WalkDir;

// Embed the UI directly in the binary
const UI_HTML: &str = include_str!("ui.html");

/// Image formats the demo will try to decode.
pub const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerifyParams {
    pub path: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_denomination")]
    pub denomination: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_currency() -> String { "INR".to_string() }
fn default_denomination() -> String { "50".to_string() }

/// One scanned note: the structured result plus its rendered explanation.
#[derive(Serialize)]
pub struct NoteReport {
    pub analysis: AnalysisResult,
    pub explanation: String,
}

#[derive(Serialize)]
pub struct VerifyReport {
    pub generated: String,
    pub summary: Summary,
    pub notes: Vec<NoteReport>,
    pub params: VerifyParams,
}

/// Start server, open browser, serve UI
pub fn start(port: u16, path: PathBuf, catalog: Catalog) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let url = format!("http://localhost:{}", port);
    let path_str = path.canonicalize().unwrap_or(path.clone()).display().to_string();

    eprintln!("\n\x1b[1;32m💵 Verinote\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Scanning: {}\n", path_str);

    // Open browser
    let _ = open::that(&url);

    // Handle requests
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &path_str, &catalog) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn handle_request(mut request: Request, default_path: &str, catalog: &Catalog) -> std::io::Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();

    match (&method, path) {
        // Serve embedded UI
        (&Method::Get, "/") => {
            // Inject the default path into the HTML
            let html = UI_HTML.replace("{{DEFAULT_PATH}}", default_path);
            let response = Response::from_string(html)
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..]).unwrap());
            request.respond(response)
        }

        // API: Verify notes under a path
        (&Method::Get, "/api/verify") | (&Method::Post, "/api/verify") => {
            let params = parse_params(&mut request, default_path)?;
            eprintln!("→ {} [{} {}]", params.path, params.currency, params.denomination);

            let report = run_verification(&params, catalog);
            let json = serde_json::to_string(&ApiResponse::success(report))?;

            let response = Response::from_string(json)
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap());
            request.respond(response)
        }

        // API: Full catalog for the currency/denomination pickers
        (&Method::Get, "/api/catalog") => {
            let json = serde_json::to_string(&ApiResponse::success(catalog))?;

            let response = Response::from_string(json)
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap());
            request.respond(response)
        }

        // 404
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn parse_params(request: &mut Request, default_path: &str) -> std::io::Result<VerifyParams> {
    let url = request.url().to_string();

    // Try query string
    if let Some(query) = url.split('?').nth(1) {
        if let Ok(params) = serde_urlencoded::from_str::<VerifyParams>(query) {
            return Ok(params);
        }
    }

    // Try JSON body
    let mut body = String::new();
    request.as_reader().read_to_string(&mut body)?;
    if !body.is_empty() {
        if let Ok(params) = serde_json::from_str::<VerifyParams>(&body) {
            return Ok(params);
        }
    }

    // Fall back to default path
    Ok(VerifyParams {
        path: default_path.to_string(),
        currency: default_currency(),
        denomination: default_denomination(),
        seed: None,
    })
}

/// Collect scannable image files under a path.
pub fn collect_images(path: &PathBuf) -> Vec<PathBuf> {
    let supported: HashSet<&str> = IMAGE_EXTENSIONS.iter().cloned().collect();

    if path.is_dir() {
        WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path().extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| supported.contains(ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect()
    } else if path.exists() {
        vec![path.clone()]
    } else {
        vec![]
    }
}

fn run_verification(params: &VerifyParams, catalog: &Catalog) -> VerifyReport {
    let files = collect_images(&PathBuf::from(&params.path));

    let mut analyzer = Analyzer::new().with_catalog(catalog.clone());
    if let Some(seed) = params.seed {
        analyzer = analyzer.with_seed(seed);
    }

    let results: Vec<AnalysisResult> = files
        .par_iter()
        .map(|p| analyzer.analyze(p, &params.currency, &params.denomination))
        .collect();
    let summary = Summary::from_results(&results);

    let currency_name = catalog.display_name(&params.currency).to_string();
    let notes = results
        .into_iter()
        .map(|analysis| {
            let explanation = explain::compose(&analysis, &currency_name);
            NoteReport { analysis, explanation }
        })
        .collect();

    VerifyReport {
        generated: chrono::Local::now().to_rfc3339(),
        summary,
        notes,
        params: params.clone(),
    }
}
