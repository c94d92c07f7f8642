use std::env;
#[cfg(feature = "buildtime_bindgen")]
use std::path::{Path, PathBuf};

const MINIMUM_PROJ_VERSION: &str = if cfg!(feature = "proj_9_6") {
    "9.6.0"
} else {
    "9.4.0"
};

#[cfg(feature = "nobuild")]
fn main() {} // Skip the build script on docs.rs

#[cfg(not(feature = "nobuild"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=wrapper.h");
    println!("cargo:rerun-if-env-changed=PROJ_LIB_DIR");

    // An explicit library directory wins over pkg-config, e.g. for cross builds.
    if let Ok(dir) = env::var("PROJ_LIB_DIR") {
        eprintln!("linking libproj from PROJ_LIB_DIR={dir}");
        println!("cargo:rustc-link-search=native={dir}");
        println!("cargo:rustc-link-lib=proj");
        #[cfg(feature = "buildtime_bindgen")]
        generate_bindings(None)?;
        return Ok(());
    }

    let pk = pkg_config::Config::new()
        .atleast_version(MINIMUM_PROJ_VERSION)
        .probe("proj")
        .map_err(|err| {
            format!(
                "pkg-config unable to find libproj >= {MINIMUM_PROJ_VERSION}: {err}. \
                 Install PROJ or set PROJ_LIB_DIR"
            )
        })?;
    eprintln!(
        "found acceptable libproj {} installed at: {:?}",
        pk.version, pk.link_paths
    );

    #[cfg(feature = "buildtime_bindgen")]
    generate_bindings(pk.include_paths.first().map(PathBuf::as_path))?;
    #[cfg(not(feature = "buildtime_bindgen"))]
    let _ = pk;

    Ok(())
}

#[cfg(all(feature = "buildtime_bindgen", not(feature = "nobuild")))]
fn generate_bindings(include_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = bindgen::Builder::default();
    if let Some(include_path) = include_path {
        builder = builder.clang_arg(format!("-I{}", include_path.to_string_lossy()));
    }
    let bindings = builder
        .trust_clang_mangling(false)
        .size_t_is_usize(true)
        .blocklist_type("max_align_t")
        .header("wrapper.h")
        .generate()?;

    // Write the bindings to the $OUT_DIR/bindings.rs file.
    let out_path = PathBuf::from(env::var("OUT_DIR")?);
    bindings.write_to_file(out_path.join("bindings.rs"))?;
    Ok(())
}
