use std::{env, fs, path::PathBuf, process::ExitCode};
use zkswap_prover::bench_vectors::swap_fixture_source;

fn main() -> ExitCode {
    // zkswap-prover/benches/fixture.rs, or the first argument
    let dst = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("benches/fixture.rs")
    });

    let code = match swap_fixture_source() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("proving failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = fs::write(&dst, code) {
        eprintln!("write {}: {e}", dst.display());
        return ExitCode::FAILURE;
    }
    eprintln!("Wrote {}", dst.display());
    ExitCode::SUCCESS
}
