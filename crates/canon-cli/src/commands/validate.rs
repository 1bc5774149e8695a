use crate::support::{load_declaration_or_exit, print_findings};
use canon_caselaw::{CachedValidator, JsonlStore};
use canon_forms::standard_engine;

pub fn run(declaration: String, caselaw: Option<String>, json_output: bool) {
    let engine = standard_engine();
    let decl = load_declaration_or_exit(&declaration);

    let verdict = match caselaw {
        Some(archive_path) => {
            let store = JsonlStore::open(&archive_path).unwrap_or_else(|e| {
                eprintln!("error: {archive_path}: {e}");
                std::process::exit(2);
            });
            CachedValidator::new(&engine, &store)
                .validate(&decl)
                .unwrap_or_else(|e| {
                    eprintln!("error: {archive_path}: {e}");
                    std::process::exit(2);
                })
        }
        None => engine.validate(&decl),
    };

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&verdict).expect("json serialization")
        );
    } else {
        println!("canon validate {declaration}");
        println!("  Signature: {}", verdict.signature);
        println!("  Verdict: {}", if verdict.ok { "pass" } else { "fail" });
        print_findings(&verdict.findings);
    }

    if !verdict.ok {
        std::process::exit(1);
    }
}
