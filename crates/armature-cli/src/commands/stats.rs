use crate::render::print_stats;
use crate::support::print_json_or_exit;
use armature_kernel::{Skeleton, load_json, stats};

pub fn run(file: String, json_output: bool) {
    let raw = load_json(&file).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let skeleton = Skeleton::from_value(&raw).unwrap_or_else(|e| {
        eprintln!("error: {file}: {e}");
        std::process::exit(1);
    });
    let stats = stats::compute(&skeleton);

    if json_output {
        print_json_or_exit(&stats);
    } else {
        println!("armature stats {file}");
        print_stats(&stats);
    }
}
