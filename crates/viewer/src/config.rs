use std::path::PathBuf;

use clap::Parser;
use trellis_mesh::Colour;

#[derive(Parser, Debug)]
#[command(author, version, about = "Renders a triangulated .obj model", long_about = None)]
pub struct Args {
    /// Model to display. Without one, a built-in double-sided triangle is shown.
    pub model: Option<PathBuf>,

    /// Vertex colour applied to the whole model, as `r,g,b[,a]` in 0..1.
    #[arg(short, long, value_parser = parse_colour, default_value = "1,1,1,1")]
    pub colour: Colour,

    /// Draw the model without a texture.
    #[arg(long)]
    pub untextured: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub model_path: Option<PathBuf>,
    pub colour: Colour,
    pub textured: bool,
    pub clear_colour: wgpu::Color,
    /// Speed of keyboard and mouse camera movement.
    pub camera_speed: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            colour: Colour::WHITE,
            textured: true,
            clear_colour: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
            camera_speed: 0.2,
        }
    }
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        Self {
            model_path: args.model,
            colour: args.colour,
            textured: !args.untextured,
            ..Default::default()
        }
    }
}

fn parse_colour(s: &str) -> Result<Colour, String> {
    let components = s
        .split(',')
        .map(|c| c.trim().parse::<f32>().map_err(|e| format!("`{}`: {}", c, e)))
        .collect::<Result<Vec<_>, _>>()?;
    match components[..] {
        [r, g, b] => Ok(Colour::new(r, g, b, 1.0)),
        [r, g, b, a] => Ok(Colour::new(r, g, b, a)),
        _ => Err(format!(
            "expected 3 or 4 components, found {}",
            components.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_with_alpha() {
        assert_eq!(Ok(Colour::new(0.5, 0.25, 1.0, 0.5)), parse_colour("0.5,0.25,1,0.5"));
    }

    #[test]
    fn colour_defaults_to_opaque() {
        assert_eq!(Ok(Colour::new(1.0, 0.0, 0.0, 1.0)), parse_colour("1, 0, 0"));
    }

    #[test]
    fn colour_rejects_bad_input() {
        assert!(parse_colour("1,0").is_err());
        assert!(parse_colour("red").is_err());
    }

    #[test]
    fn args_into_config() {
        let args = Args::parse_from(["trellis-viewer", "cube.obj", "--untextured", "-c", "0,1,0"]);
        let config = ViewerConfig::from(args);
        assert_eq!(Some(PathBuf::from("cube.obj")), config.model_path);
        assert_eq!(Colour::GREEN, config.colour);
        assert!(!config.textured);
    }
}
