use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, put, web};
use clap::Parser;
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::Value;

use permy_core::CompiledGrammar;
use permy_core::dictionary::{Dictionary, Mode, SuggestInput};
use permy_core::io::{list_files, normalize_folder};

/// HTTP front-end serving typeahead suggestions from permutation grammars.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Folder containing `<name>.json` dictionaries
	#[arg(long, default_value = "./data")]
	data: String,

	/// Comma-separated dictionaries to load at start-up
	#[arg(long)]
	load: Option<String>,
}

/// Query parameters of the `/v1/suggest` endpoint
#[derive(Deserialize)]
struct SuggestParams {
	text: String,
	mode: Option<Mode>,
	window: Option<usize>,
	max_results: Option<usize>,
}

impl SuggestParams {
	/// Builds the lookup configuration, validating every override.
	fn suggest_input(&self) -> Result<SuggestInput, String> {
		let mut input = SuggestInput::new(self.mode.unwrap_or_default());
		if let Some(window) = self.window {
			input.set_window(window)?;
		}
		input.set_max_results(self.max_results)?;
		Ok(input)
	}
}

/// Query parameters of `GET /v1/expand`
#[derive(Deserialize)]
struct ExpandQuery {
	script: String,
	mode: Option<Mode>,
	max_results: Option<usize>,
}

/// Body of `POST /v1/expand`: `source` is a script string or a prebuilt structure
#[derive(Deserialize)]
struct ExpandBody {
	source: Value,
	mode: Option<Mode>,
	max_results: Option<usize>,
}

#[derive(Deserialize)]
struct DictionaryQuery {
	names: Option<String>,
}

struct SharedData {
	dictionary: Dictionary,
	folder: PathBuf,
}

/// Compiles and expands one grammar.
///
/// Engine errors (parse, structure, unknown branch, cycle) are client
/// errors: the grammar came from the request.
fn expand(grammar: Result<CompiledGrammar, permy_core::GrammarError>, mode: Option<Mode>, max_results: Option<usize>) -> HttpResponse {
	if max_results == Some(0) {
		return HttpResponse::BadRequest().body("max_results must be at least 1");
	}
	let result = grammar.and_then(|grammar| match mode.unwrap_or(Mode::All) {
		Mode::One => grammar.sample().map(|word| vec![word]),
		Mode::All => grammar.enumerate_limited(max_results.unwrap_or(usize::MAX)),
	});
	match result {
		Ok(words) => HttpResponse::Ok().json(words),
		Err(e) => HttpResponse::UnprocessableEntity().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/suggest`
///
/// Looks up the end of `text` in the loaded dictionary.
/// Returns the suggestion as JSON, or 204 when nothing matches or the
/// matched entry fails to expand.
#[get("/v1/suggest")]
async fn get_suggestion(data: web::Data<Mutex<SharedData>>, query: web::Query<SuggestParams>) -> impl Responder {
	let input = match query.suggest_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Dictionary lock failed"),
	};

	match shared_data.dictionary.suggest(&query.text, &input) {
		Ok(Some(suggestion)) => HttpResponse::Ok().json(suggestion),
		Ok(None) => HttpResponse::NoContent().finish(),
		Err(e) => {
			warn!("dictionary entry failed to expand: {e}");
			HttpResponse::NoContent().finish()
		}
	}
}

#[get("/v1/expand")]
async fn get_expanded(query: web::Query<ExpandQuery>) -> impl Responder {
	expand(CompiledGrammar::from_script(&query.script), query.mode, query.max_results)
}

#[post("/v1/expand")]
async fn post_expanded(body: web::Json<ExpandBody>) -> impl Responder {
	let body = body.into_inner();
	let grammar = match body.source {
		Value::String(script) => CompiledGrammar::from_script(&script),
		other => CompiledGrammar::from_json(&other),
	};
	expand(grammar, body.mode, body.max_results)
}

#[get("/v1/dictionaries")]
async fn get_dictionaries(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let folder = match data.lock() {
		Ok(m) => m.folder.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Dictionary lock failed"),
	};
	match list_files(&folder, "json") {
		Ok(files) => HttpResponse::Ok().json(files),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list dictionaries"),
	}
}

#[get("/v1/loaded_dictionaries")]
async fn get_loaded_dictionaries(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Dictionary lock failed"),
	};
	HttpResponse::Ok().json(shared_data.dictionary.get_names())
}

#[put("/v1/load_dictionaries")]
async fn put_dictionaries(data: web::Data<Mutex<SharedData>>, query: web::Query<DictionaryQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Dictionary lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty dictionary name"),
	};

	match load_dictionaries(&shared_data.folder, query_names) {
		Ok(dictionary) => {
			shared_data.dictionary = dictionary;
			HttpResponse::Ok().body("Dictionaries loaded successfully")
		}
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

/// Loads and merges `<folder>/<name>.json` for each comma-separated name.
fn load_dictionaries(folder: &Path, names: &str) -> Result<Dictionary, String> {
	let mut dictionary = Dictionary::default();
	for name in names.split(',').map(str::trim).filter(|s| !s.is_empty()) {
		let path = folder.join(format!("{name}.json"));
		let partial = Dictionary::new(&path).map_err(|e| format!("Failed to load dictionary '{name}': {e}"))?;
		info!("loaded dictionary '{name}' ({} entries)", partial.len());
		dictionary.merge(&partial);
	}
	Ok(dictionary)
}

/// Main entry point for the server.
///
/// Loads the requested dictionaries, wraps them in a `Mutex`,
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let folder = normalize_folder(&args.data);
	let dictionary = match args.load.as_deref() {
		Some(names) => match load_dictionaries(&folder, names) {
			Ok(dictionary) => dictionary,
			Err(e) => {
				error!("{e}");
				return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
			}
		},
		None => Dictionary::default(),
	};

	let shared_data = web::Data::new(Mutex::new(SharedData { dictionary, folder }));

	info!("listening on {}:{}", args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_suggestion)
			.service(get_expanded)
			.service(post_expanded)
			.service(get_dictionaries)
			.service(get_loaded_dictionaries)
			.service(put_dictionaries)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
