//! Renders every catalog archetype at its default parameters.
//!
//! Usage:
//! ```text
//! cargo run --example catalog                 # log mesh and STL sizes
//! cargo run --example catalog -- out/         # also write one .stl per archetype
//! RUST_LOG=jewelgen=debug cargo run --example catalog
//! ```

use std::path::PathBuf;

use jewelgen::catalog::{Archetype, ArchetypeKey};
use jewelgen::io::stl;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything, INFO for this demo.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("catalog=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let out_dir = std::env::args().nth(1).map(PathBuf::from);
    if let Some(dir) = &out_dir {
        std::fs::create_dir_all(dir)?;
    }

    for key in ArchetypeKey::ALL {
        let mesh = Archetype::defaults(key).render()?;
        let bytes = stl::to_bytes(&mesh, None)?;
        info!(
            archetype = %key,
            vertices = mesh.vertices.len(),
            triangles = mesh.indices.len(),
            closed = mesh.is_closed(),
            stl_bytes = bytes.len(),
            "rendered"
        );
        if let Some(dir) = &out_dir {
            let path = dir.join(format!("{}.stl", key.to_string().replace(' ', "_")));
            std::fs::write(&path, &bytes)?;
            info!(path = %path.display(), "wrote");
        }
    }
    Ok(())
}
