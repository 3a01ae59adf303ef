use std::f64::consts::PI;

use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vertex_sampling::prelude::*;
use vertex_sampling_demos::{render_layers_to_png, PointLayer, PointStyle, Projection, RenderConfig};

fn main() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    // The default polar window keeps the upper hemisphere only.
    let hemisphere = SpherePointSampler::try_new(80.0, 20.0)?;
    let full = SpherePointSampler::try_new(80.0, 20.0)?.with_theta_range(0.0, PI);

    let upper = (0..10_000)
        .map(|_| hemisphere.generate_vertex(Region::Volume, &mut rng))
        .collect::<Result<Vec<_>>>()?;
    let lower: Vec<_> = (0..10_000)
        .map(|_| full.generate_vertex(Region::Surface, &mut rng))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .filter(|p| p.z < 0.0)
        .collect();

    println!(
        "hemisphere: {} vertices, min z {:.3}",
        upper.len(),
        upper.iter().map(|p| p.z).fold(f64::INFINITY, f64::min)
    );

    let layers = [
        PointLayer::new(
            upper,
            PointStyle {
                color: [90, 170, 240],
                radius: 1,
            },
        ),
        PointLayer::new(
            lower,
            PointStyle {
                color: [240, 180, 80],
                radius: 1,
            },
        ),
    ];
    let config =
        RenderConfig::new((900, 900), DVec2::new(220.0, 220.0)).with_projection(Projection::XZ);
    render_layers_to_png(&layers, &config, "sphere-hemisphere.png")?;

    Ok(())
}
