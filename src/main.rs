// tarn - A Lisp-family interpreter written in Rust
// Copyright (c) 2026 Tarn contributors. MIT licensed.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use tarn_core::{eval, init_root_env, Env};
use tarn_parser::Parser;

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.len() == 2 && (args[1] == "--version" || args[1] == "-v") {
        println!("Tarn v0.1.0");
        return;
    }

    // Arguments after the script name are visible to programs as *ARGV*
    let argv: &[String] = if args.len() > 2 { &args[2..] } else { &[] };
    let env = match init_root_env(argv) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Failed to initialise runtime: {}", e);
            process::exit(1);
        }
    };

    // If a script is provided, evaluate it; otherwise start the REPL
    if args.len() > 1 {
        if let Err(e) = eval_file(&args[1], &env) {
            eprintln!("{}", e);
            process::exit(1);
        }
    } else {
        run_repl(&env);
    }
}

/// Evaluate a single source file
fn eval_file(file_path: &str, env: &Env) -> Result<(), String> {
    let path = Path::new(file_path);

    // Validate file extension
    match path.extension().and_then(|e| e.to_str()) {
        Some("tarn") => {}
        Some(ext) => {
            return Err(format!(
                "Error: unsupported file extension '.{}' for '{}' (expected .tarn)",
                ext, file_path
            ));
        }
        None => {
            return Err(format!(
                "Error: file '{}' has no extension (expected .tarn)",
                file_path
            ));
        }
    }

    // Read and evaluate the file
    let source =
        fs::read_to_string(path).map_err(|e| format!("Error reading '{}': {}", file_path, e))?;

    let mut parser =
        Parser::new(&source).map_err(|e| format!("Parse error in '{}': {}", file_path, e))?;

    loop {
        match parser.parse() {
            Ok(Some(expr)) => {
                eval(&expr, env).map_err(|e| format!("Error in '{}': {}", file_path, e))?;
            }
            Ok(None) => break,
            Err(e) => return Err(format!("Parse error in '{}': {}", file_path, e)),
        }
    }

    Ok(())
}

/// Run the interactive REPL
fn run_repl(env: &Env) {
    println!("Tarn v0.1.0");

    loop {
        print!("user> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }

                match Parser::new(input) {
                    Ok(mut parser) => loop {
                        match parser.parse() {
                            Ok(Some(expr)) => match eval(&expr, env) {
                                Ok(result) => println!("{}", result),
                                Err(e) => {
                                    eprintln!("Error: {}", e);
                                    break;
                                }
                            },
                            Ok(None) => break,
                            Err(e) => {
                                eprintln!("Parse error: {}", e);
                                break;
                            }
                        }
                    },
                    Err(e) => eprintln!("Parse error: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}
