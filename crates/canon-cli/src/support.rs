use canon_kernel::{Declaration, Finding, Severity};
use std::collections::BTreeMap;
use std::fs;

/// Load a declaration JSON file or exit with a diagnostic.
pub fn load_declaration_or_exit(path: &str) -> Declaration {
    let contents = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: {path}: {e}");
        std::process::exit(2);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("error: {path}: {e}");
        std::process::exit(2);
    })
}

/// Parse repeatable `name=value` parameter flags.
pub fn parse_params_or_exit(pairs: &[String]) -> BTreeMap<String, f64> {
    let mut params = BTreeMap::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            eprintln!("error: --param expects name=value, got {pair:?}");
            std::process::exit(2);
        };
        let value: f64 = value.parse().unwrap_or_else(|_| {
            eprintln!("error: --param {name}: {value:?} is not a number");
            std::process::exit(2);
        });
        params.insert(name.to_string(), value);
    }
    params
}

/// Fetch a required solver parameter or exit.
pub fn require_param_or_exit(params: &BTreeMap<String, f64>, name: &str) -> f64 {
    params.get(name).copied().unwrap_or_else(|| {
        eprintln!("error: missing required --param {name}=<value>");
        std::process::exit(2);
    })
}

/// Print findings grouped by severity, most severe first.
pub fn print_findings(findings: &[Finding]) {
    for severity in [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ] {
        let group: Vec<&Finding> = findings.iter().filter(|f| f.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        println!("  {severity} ({}):", group.len());
        for finding in group {
            println!("    {finding}");
        }
    }
}
