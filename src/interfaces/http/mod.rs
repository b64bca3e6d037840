use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::application::{ImportDirectoryUseCase, OccupantHistoryUseCase};
use crate::domain::directory::{DirectoryTable, SelectionKind, SelectionState, YearListing};
use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;

pub mod render;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

/// Session-scoped shell state. The table is rebuilt fresh per upload and
/// never mutated in place; selections live beside it so CLEAR ALL and a new
/// upload can reset them together.
pub struct HttpState {
    pub import_use_case: ImportDirectoryUseCase,
    pub history_use_case: OccupantHistoryUseCase,
    pub table: Mutex<Option<DirectoryTable>>,
    pub selection: Mutex<SelectionState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    pub max_upload_bytes: usize,
}

impl HttpState {
    pub fn new(max_upload_bytes: usize, logs: Arc<Mutex<Vec<LogEntry>>>) -> Self {
        Self {
            import_use_case: ImportDirectoryUseCase::new(),
            history_use_case: OccupantHistoryUseCase::new(),
            table: Mutex::new(None),
            selection: Mutex::new(SelectionState::new()),
            logs,
            max_upload_bytes,
        }
    }
}

#[derive(Deserialize)]
pub struct UploadQuery {
    pub name: String,
}

#[derive(Deserialize)]
pub struct SelectionRequest {
    pub kind: SelectionKind,
    pub addresses: Vec<String>,
}

#[derive(Deserialize)]
pub struct RunRequest {
    pub kind: SelectionKind,
}

/// One rendered result per selected address: the structured rows plus the
/// HTML block the frontend drops into its panel.
#[derive(Serialize)]
pub struct AddressBlock {
    pub address: String,
    pub rows: Vec<YearListing>,
    pub html: String,
}

#[derive(Serialize)]
pub struct RunResponse {
    pub kind: SelectionKind,
    pub blocks: Vec<AddressBlock>,
}

#[post("/upload")]
async fn upload(
    data: web::Data<HttpState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    if body.len() > data.max_upload_bytes {
        add_log(
            &data.logs,
            "ERROR",
            "Upload",
            &format!(
                "Rejected {}: {} bytes exceeds the {} byte limit",
                query.name,
                body.len(),
                data.max_upload_bytes
            ),
        );
        return HttpResponse::PayloadTooLarge().body("upload too large");
    }

    add_log(
        &data.logs,
        "INFO",
        "Upload",
        &format!("Importing {} ({} bytes)", query.name, body.len()),
    );

    match data.import_use_case.import(&query.name, &body) {
        Ok(table) => {
            let summary = table.summary();
            add_log(
                &data.logs,
                "INFO",
                "Upload",
                &format!(
                    "Loaded {} rows, found {} unique addresses",
                    summary.rows, summary.addresses
                ),
            );
            *data.table.lock().unwrap() = Some(table);
            data.selection.lock().unwrap().clear_all();
            HttpResponse::Ok().json(summary)
        }
        Err(err @ AppError::MissingAddressColumn) => {
            add_log(
                &data.logs,
                "ERROR",
                "Upload",
                &format!("Import failed: {}", err),
            );
            HttpResponse::UnprocessableEntity().body(err.to_string())
        }
        Err(err) => {
            add_log(
                &data.logs,
                "ERROR",
                "Upload",
                &format!("Import failed: {}", err),
            );
            HttpResponse::BadRequest().body(err.to_string())
        }
    }
}

#[get("/addresses")]
async fn addresses(data: web::Data<HttpState>) -> impl Responder {
    match &*data.table.lock().unwrap() {
        Some(table) => HttpResponse::Ok().json(table.addresses()),
        None => HttpResponse::NotFound().body("no file loaded"),
    }
}

#[post("/selection")]
async fn set_selection(
    data: web::Data<HttpState>,
    req: web::Json<SelectionRequest>,
) -> impl Responder {
    let req = req.into_inner();
    add_log(
        &data.logs,
        "INFO",
        "Selection",
        &format!(
            "{} selection set to {} addresses",
            req.kind.label(),
            req.addresses.len()
        ),
    );

    let mut selection = data.selection.lock().unwrap();
    selection.set_selection(req.kind, req.addresses);
    HttpResponse::Ok().json(&*selection)
}

#[post("/run")]
async fn run_tables(data: web::Data<HttpState>, req: web::Json<RunRequest>) -> impl Responder {
    let kind = req.kind;

    let table_guard = data.table.lock().unwrap();
    let Some(table) = table_guard.as_ref() else {
        return HttpResponse::NotFound().body("no file loaded");
    };

    let mut selection = data.selection.lock().unwrap();
    selection.mark_run(kind);

    let blocks: Vec<AddressBlock> = selection
        .selection(kind)
        .iter()
        .map(|address| {
            let rows = data.history_use_case.group(table, address);
            let html = render::address_block(address, kind.label(), &rows);
            AddressBlock {
                address: address.clone(),
                rows,
                html,
            }
        })
        .collect();

    add_log(
        &data.logs,
        "INFO",
        "Tables",
        &format!("Built {} {} table(s)", blocks.len(), kind.label()),
    );

    HttpResponse::Ok().json(RunResponse { kind, blocks })
}

#[post("/clear")]
async fn clear(data: web::Data<HttpState>) -> impl Responder {
    data.selection.lock().unwrap().clear_all();
    add_log(&data.logs, "INFO", "Selection", "Selections cleared");
    HttpResponse::Ok().json(serde_json::json!({ "cleared": true }))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn start_server(config: &AppConfig, state: web::Data<HttpState>) -> std::io::Result<Server> {
    let max_upload_bytes = config.max_upload_bytes;

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .service(
                web::scope("/api")
                    .service(upload)
                    .service(addresses)
                    .service(set_selection)
                    .service(run_tables)
                    .service(clear)
                    .service(get_logs),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
