use crate::support::{load_declaration_or_exit, print_findings};
use canon_forms::standard_engine;
use canon_kernel::{CanonError, RealizeBudget, RealizeOptions, cancel_pair, realize_on_worker};
use std::sync::Arc;
use std::time::Duration;

pub struct Args {
    pub declaration: String,
    pub timeout_ms: Option<u64>,
    pub skip_validation: bool,
    pub allow_bypass: bool,
    pub json: bool,
}

pub fn run(args: Args) {
    let engine = Arc::new(standard_engine());
    let decl = Arc::new(load_declaration_or_exit(&args.declaration));

    let opts = RealizeOptions {
        skip_validation: args.skip_validation,
        allow_bypass: args.allow_bypass,
    };
    let budget = RealizeBudget {
        timeout: args.timeout_ms.map(Duration::from_millis),
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: runtime: {e}");
        std::process::exit(2);
    });
    let (_cancel, token) = cancel_pair();
    let result = runtime.block_on(realize_on_worker(engine, decl, opts, budget, token));

    let result = match result {
        Ok(result) => result,
        Err(CanonError::ValidationBypass) => {
            eprintln!("error: canon bypass refused: pass --allow-bypass to sanction it");
            std::process::exit(2);
        }
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).expect("json serialization")
        );
    } else {
        println!("canon realize {}", args.declaration);
        println!("  Signature: {}", result.signature);
        if result.bypass.is_some() {
            println!("  BYPASSED — not canon-validated");
        }
        println!(
            "  Realized: {}",
            if result.ok() { "yes" } else { "no" }
        );
        for realization in &result.realizations {
            let metrics: Vec<String> = realization
                .metrics
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            println!(
                "  {} ({}): {}",
                realization.form_id,
                realization.provenance.realizer,
                metrics.join(", ")
            );
        }
        print_findings(&result.findings);
    }

    if !result.ok() {
        std::process::exit(1);
    }
}
