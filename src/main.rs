//! Cairn - glTF inspection and decoding tool
//!
//! This is the main entry point for the cairn command line tool.

mod settings;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cairn_assets::{AssetServer, DirResolver};
use cairn_gltf::{parse_document, AssetKey, Gltf, GltfPrimitive, ResourceResolver};

use crate::settings::InspectorSettings;

#[derive(Parser)]
#[command(name = "cairn")]
#[command(about = "glTF inspection and decoding tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a glTF document and report its structure
    Info {
        /// Asset key in module:name form
        key: String,

        /// Asset root directory (overrides the saved setting)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Write the effective settings back to disk
        #[arg(long)]
        save_config: bool,
    },

    /// Decode the mesh behind a key and report its streams
    Decode {
        /// Asset key in module:name form
        key: String,

        /// Asset root directory (overrides the saved setting)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Number of leading values to print per stream
        #[arg(long)]
        preview: Option<usize>,

        /// Write the effective settings back to disk
        #[arg(long)]
        save_config: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging. Reports go to stdout, logs to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let cli = Cli::parse();
    let mut settings = InspectorSettings::load();

    match cli.command {
        Commands::Info {
            key,
            root,
            save_config,
        } => {
            if let Some(root) = root {
                settings.asset_root = root;
            }
            if save_config {
                settings.save()?;
            }
            cmd_info(&settings, &key)
        }

        Commands::Decode {
            key,
            root,
            preview,
            save_config,
        } => {
            if let Some(root) = root {
                settings.asset_root = root;
            }
            if let Some(preview) = preview {
                settings.preview_values = preview;
            }
            if save_config {
                settings.save()?;
            }
            cmd_decode(&settings, &key)
        }
    }
}

fn parse_key(key: &str) -> Result<AssetKey> {
    AssetKey::parse(key)
        .with_context(|| format!("invalid asset key '{}', expected module:name", key))
}

/// Parse a document and report its structure without decoding any buffers.
fn cmd_info(settings: &InspectorSettings, key: &str) -> Result<()> {
    let asset = parse_key(key)?;
    let resolver = DirResolver::new(&settings.asset_root);
    let document_key = asset.sibling(format!("{}.gltf", asset.name()));
    let json = resolver
        .resolve(&document_key)
        .with_context(|| format!("no document found for {}", document_key))?;
    let gltf = parse_document(&asset, &json)?;

    print_structure(&asset, &gltf);
    Ok(())
}

fn print_structure(asset: &AssetKey, gltf: &Gltf) {
    println!("{}", asset);
    println!("  version: {}", gltf.asset.version);
    if let Some(generator) = &gltf.asset.generator {
        println!("  generator: {}", generator);
    }
    println!(
        "  {} buffer(s), {} view(s), {} accessor(s)",
        gltf.buffers.len(),
        gltf.buffer_views.len(),
        gltf.accessors.len()
    );

    for (index, mesh) in gltf.meshes.iter().enumerate() {
        let name = mesh.name.as_deref().unwrap_or("unnamed");
        println!(
            "  mesh {} '{}': {} primitive(s)",
            index,
            name,
            mesh.primitives.len()
        );
        for (pindex, primitive) in mesh.primitives.iter().enumerate() {
            let mut semantics: Vec<&str> =
                primitive.attributes.keys().map(String::as_str).collect();
            semantics.sort_unstable();
            println!(
                "    primitive {} [{:?}]: attributes {:?}, indices {}",
                pindex,
                primitive.mode,
                semantics,
                describe_indices(primitive, gltf)
            );
        }
    }

    for (index, node) in gltf.nodes.iter().enumerate() {
        let name = node.name.as_deref().unwrap_or("unnamed");
        let translation = node.local_matrix().w_axis;
        let mesh_note = match node.mesh {
            Some(mesh) => format!(", mesh {}", mesh),
            None => String::new(),
        };
        println!(
            "  node {} '{}' at [{:.2}, {:.2}, {:.2}]{}",
            index, name, translation.x, translation.y, translation.z, mesh_note
        );
    }

    for (index, scene) in gltf.scenes.iter().enumerate() {
        let name = scene.name.as_deref().unwrap_or("unnamed");
        let default_note = if gltf.scene == Some(index) {
            " (default)"
        } else {
            ""
        };
        println!(
            "  scene {} '{}': {} root node(s){}",
            index,
            name,
            scene.nodes.len(),
            default_note
        );
    }
}

/// Human form of a primitive's index binding, e.g. "3 x 5123 (UnsignedShort)".
fn describe_indices(primitive: &GltfPrimitive, gltf: &Gltf) -> String {
    let Some(index) = primitive.indices else {
        return "none".to_string();
    };
    match gltf.accessors.get(index) {
        Some(accessor) => format!(
            "{} x {} ({:?})",
            accessor.count,
            accessor.component_type.code(),
            accessor.component_type
        ),
        None => format!("accessor {} (dangling)", index),
    }
}

/// Decode the mesh behind a key and report its streams.
fn cmd_decode(settings: &InspectorSettings, key: &str) -> Result<()> {
    let resolver = DirResolver::new(&settings.asset_root);
    let mut server = AssetServer::new(resolver);
    let handle = server.load_mesh(key)?;
    let Some(mesh) = server.get_mesh(handle) else {
        bail!("mesh vanished after loading");
    };

    println!("mesh '{}'", mesh.name);
    println!(
        "  {} vertices, {} indices",
        mesh.vertex_count(),
        mesh.indices.len()
    );
    if let Some((min, max)) = mesh.bounds() {
        println!(
            "  bounds: [{:.3}, {:.3}, {:.3}] to [{:.3}, {:.3}, {:.3}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    let limit = settings.preview_values;
    preview("indices", &mesh.indices, limit);
    preview("positions", &mesh.positions, limit);
    preview("normals", &mesh.normals, limit);
    if let Some(tex_coords) = &mesh.tex_coords {
        preview("tex_coords", tex_coords, limit);
    }
    if let Some(colors) = &mesh.colors {
        preview("colors", colors, limit);
    }
    for attribute in &mesh.extra {
        preview(&attribute.semantic.to_string(), &attribute.data, limit);
    }
    Ok(())
}

fn preview<T: std::fmt::Debug>(label: &str, values: &[T], limit: usize) {
    if values.is_empty() {
        return;
    }
    let shown = &values[..values.len().min(limit)];
    let suffix = if values.len() > shown.len() { ", .." } else { "" };
    println!("  {} ({}): {:?}{}", label, values.len(), shown, suffix);
}
