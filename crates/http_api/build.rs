use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let web_dir = manifest_dir.join("../../apps/web");
    if !web_dir.join("index.html").exists() {
        panic!("missing dashboard page at {}", web_dir.join("index.html").display());
    }

    let mut files = Vec::new();
    collect_files(&web_dir, &mut files);
    files.sort();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    let dest_path = out_dir.join("embedded_assets.rs");

    let mut output = String::new();
    output.push_str("pub struct EmbeddedAsset {\n");
    output.push_str("    pub path: &'static str,\n");
    output.push_str("    pub mime: &'static str,\n");
    output.push_str("    pub bytes: &'static [u8],\n");
    output.push_str("}\n\n");
    output.push_str("pub static EMBEDDED_ASSETS: &[EmbeddedAsset] = &[\n");

    for file in &files {
        let rel_path = file
            .strip_prefix(&web_dir)
            .expect("relative path")
            .to_string_lossy()
            .replace('\\', "/");
        output.push_str(&format!(
            "    EmbeddedAsset {{ path: \"{}\", mime: \"{}\", bytes: include_bytes!(r#\"{}\"#) }},\n",
            rel_path,
            mime_for_path(file),
            file.display()
        ));
        println!("cargo:rerun-if-changed={}", file.display());
    }

    output.push_str("];\n");
    fs::write(&dest_path, output).expect("write embedded_assets.rs");

    println!("cargo:rerun-if-changed={}", web_dir.display());
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            collect_files(&path, files);
        } else if path.is_file() {
            files.push(path);
        }
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()).unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
