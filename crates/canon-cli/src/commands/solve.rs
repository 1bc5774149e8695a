use crate::support::{parse_params_or_exit, require_param_or_exit};
use canon_forms::solver;
use std::fs;

pub fn run(kind: String, params: Vec<String>, title: Option<String>, out: Option<String>) {
    let params = parse_params_or_exit(&params);

    let mut decl = match kind.as_str() {
        "circle" => solver::circle(require_param_or_exit(&params, "radius")),
        "sphere" => solver::sphere(require_param_or_exit(&params, "radius")),
        "regular-polygon" => {
            let sides = require_param_or_exit(&params, "sides");
            if sides.fract() != 0.0 || sides < 3.0 {
                eprintln!("error: --param sides must be an integer >= 3, got {sides}");
                std::process::exit(2);
            }
            solver::regular_polygon(
                sides as u32,
                require_param_or_exit(&params, "circumradius"),
            )
        }
        "truncated-pyramid" => solver::truncated_pyramid(
            require_param_or_exit(&params, "base_edge"),
            require_param_or_exit(&params, "height"),
            require_param_or_exit(&params, "truncation_ratio"),
        ),
        other => {
            eprintln!(
                "error: unknown kind {other:?} (expected circle, sphere, regular-polygon, \
                 or truncated-pyramid)"
            );
            std::process::exit(2);
        }
    };

    if let Some(title) = title {
        decl.title = title;
    }

    let json = serde_json::to_string_pretty(&decl).expect("json serialization");
    match out {
        Some(path) => {
            fs::write(&path, format!("{json}\n")).unwrap_or_else(|e| {
                eprintln!("error: {path}: {e}");
                std::process::exit(2);
            });
            println!("wrote {path} ({})", decl.signature());
        }
        None => println!("{json}"),
    }
}
