use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use digest_config::{Config, DedupScope};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut table = root.as_table_mut().expect("Template config must be a table.");

	for part in section.split('.') {
		table = table
			.get_mut(part)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{section}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn sample_toml_without(section: &str) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	root.as_table_mut().expect("Template config must be a table.").remove(section);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("digest_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> digest_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = digest_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation_error(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");
	let message = err.to_string();

	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config should load.");

	assert_eq!(cfg.providers.embedding.api_base, "https://api.openai.com");
	assert_eq!(cfg.paragraphs.boilerplate_keywords, vec!["copyright", "figure", "index"]);
	assert_eq!(cfg.chunking.max_sentences, 5);
	assert_eq!(cfg.summary.top_k, 4);
	assert_eq!(cfg.dedup.scope, DedupScope::Run);
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let mut payload = sample_toml_without("paragraphs");

	for section in ["chunking", "summary", "dedup"] {
		let mut root: Value = toml::from_str(&payload).expect("Failed to parse config.");

		root.as_table_mut().expect("Config must be a table.").remove(section);

		payload = toml::to_string(&root).expect("Failed to render config.");
	}

	let cfg = load_payload(payload).expect("Config without optional sections should load.");

	assert_eq!(cfg.paragraphs.min_words, 30);
	assert_eq!(cfg.paragraphs.boilerplate_keywords, vec!["copyright", "figure", "index"]);
	assert!(!cfg.paragraphs.split_raw_text);
	assert_eq!(cfg.chunking.max_sentences, 5);
	assert_eq!(cfg.chunking.fragment_max_words, 4);
	assert_eq!(cfg.summary.top_k, 4);
	assert_eq!(cfg.summary.title_chars, 80);
	assert_eq!(cfg.summary.title_suffix, "...");
	assert_eq!(cfg.dedup.scope, DedupScope::Run);
}

#[test]
fn dedup_scope_accepts_document() {
	let payload = sample_toml_with("dedup", "scope", Value::String("document".to_string()));
	let cfg = load_payload(payload).expect("Document scope should load.");

	assert_eq!(cfg.dedup.scope, DedupScope::Document);
}

#[test]
fn unknown_dedup_scope_is_a_parse_error() {
	let payload = sample_toml_with("dedup", "scope", Value::String("global".to_string()));
	let err = load_payload(payload).expect_err("Expected parse error.");

	assert!(matches!(err, digest_config::Error::ParseConfig { .. }), "Unexpected error: {err:?}");
}

#[test]
fn top_k_must_be_positive() {
	expect_validation_error(
		sample_toml_with("summary", "top_k", Value::Integer(0)),
		"summary.top_k must be greater than zero.",
	);
}

#[test]
fn max_sentences_must_be_positive() {
	expect_validation_error(
		sample_toml_with("chunking", "max_sentences", Value::Integer(0)),
		"chunking.max_sentences must be greater than zero.",
	);
}

#[test]
fn log_level_must_keep_warnings_visible() {
	for level in ["error", "OFF", "digest_service=debug, error"] {
		expect_validation_error(
			sample_toml_with("service", "log_level", Value::String(level.to_string())),
			"service.log_level must not filter out warnings globally.",
		);
	}

	let payload =
		sample_toml_with("service", "log_level", Value::String("warn,reqwest=off".to_string()));
	let cfg = load_payload(payload).expect("Target-scoped off should load.");

	assert_eq!(cfg.service.log_level, "warn,reqwest=off");
}

#[test]
fn dimensions_must_be_positive() {
	expect_validation_error(
		sample_toml_with("providers.embedding", "dimensions", Value::Integer(0)),
		"providers.embedding.dimensions must be greater than zero.",
	);
}

#[test]
fn http_provider_requires_api_key() {
	expect_validation_error(
		sample_toml_with("providers.embedding", "api_key", Value::String(" ".to_string())),
		"providers.embedding.api_key must be non-empty",
	);
}

#[test]
fn local_hash_provider_needs_no_credentials() {
	let payload = sample_toml_with(
		"providers.embedding",
		"provider_id",
		Value::String("local-hash".to_string()),
	);
	let mut root: Value = toml::from_str(&payload).expect("Failed to parse config.");
	let embedding = root
		.get_mut("providers")
		.and_then(|providers| providers.get_mut("embedding"))
		.and_then(Value::as_table_mut)
		.expect("Config must include [providers.embedding].");

	embedding.remove("api_key");
	embedding.remove("api_base");
	embedding.remove("model");

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Local hash provider should load without credentials.");

	assert!(cfg.providers.embedding.is_local_hash());
	assert_eq!(cfg.providers.embedding.path, "/v1/embeddings");
}

#[test]
fn blank_boilerplate_keyword_is_rejected() {
	expect_validation_error(
		sample_toml_with(
			"paragraphs",
			"boilerplate_keywords",
			Value::Array(vec![
				Value::String("copyright".to_string()),
				Value::String("  ".to_string()),
			]),
		),
		"paragraphs.boilerplate_keywords entries must be non-empty.",
	);
}

#[test]
fn missing_job_file_is_reported() {
	let mut path = env::temp_dir();

	path.push(format!("digest_missing_job_{}.json", std::process::id()));

	let err = digest_config::load_job(&path).expect_err("Expected missing job error.");

	assert!(matches!(err, digest_config::Error::ReadJob { .. }), "Unexpected error: {err:?}");
}
