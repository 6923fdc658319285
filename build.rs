use std::env;

fn main() {
    // Los tests contra PostgreSQL corren sólo si hay una base configurada
    println!("cargo:rerun-if-env-changed=DATABASE_URL");
    println!("cargo:rustc-check-cfg=cfg(database_tests)");

    let configured = env::var("DATABASE_URL")
        .map(|url| !url.trim().is_empty())
        .unwrap_or(false);
    if configured {
        println!("cargo:rustc-cfg=database_tests");
    }
}
