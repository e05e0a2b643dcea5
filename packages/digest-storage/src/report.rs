use std::{
	ffi::OsString,
	fs,
	path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{Error, Result};

const INDENT: &[u8] = b"    ";

/// Pretty-prints `value` as JSON with four-space indentation. Non-ASCII text is kept verbatim.
pub fn to_pretty_json<T>(value: &T) -> Result<Vec<u8>>
where
	T: Serialize,
{
	let mut buf = Vec::new();
	let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));

	value.serialize(&mut serializer)?;

	Ok(buf)
}

/// Writes `value` to `path` through a sibling temp file and a rename, so readers only ever see
/// a complete document.
pub fn write_json_atomic<T>(path: &Path, value: &T) -> Result<()>
where
	T: Serialize,
{
	let payload = to_pretty_json(value)?;
	let tmp = temp_path(path)?;

	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		fs::create_dir_all(parent)
			.map_err(|err| Error::Io { path: parent.to_path_buf(), source: err })?;
	}

	fs::write(&tmp, payload).map_err(|err| Error::Io { path: tmp.clone(), source: err })?;

	if let Err(err) = fs::rename(&tmp, path) {
		let _ = fs::remove_file(&tmp);

		return Err(Error::Io { path: path.to_path_buf(), source: err });
	}

	Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
	let Some(name) = path.file_name() else {
		return Err(Error::InvalidArgument(format!("Output path {path:?} has no file name.")));
	};
	let mut tmp_name = OsString::from(".");

	tmp_name.push(name);
	tmp_name.push(format!(".{}.tmp", std::process::id()));

	Ok(path.with_file_name(tmp_name))
}
