use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vertex_sampling::prelude::*;
use vertex_sampling_demos::{render_layers_to_png, PointLayer, PointStyle, RenderConfig};

fn main() -> anyhow::Result<()> {
    // Cavity 20 x 40 x 60 with 5 wide walls.
    let sampler = BoxPointSampler::try_new(10.0, 20.0, 30.0, 5.0)?;
    let mut rng = StdRng::seed_from_u64(2025);

    let mut draw = |region: Region, count: usize| -> Result<Vec<_>> {
        (0..count)
            .map(|_| sampler.generate_vertex(region, &mut rng))
            .collect()
    };

    let walls = draw(Region::WholeVolume, 20_000)?;
    let cavity = draw(Region::Inside, 4_000)?;

    let fractions = sampler.wall_volume_fractions();
    println!(
        "wall volume fractions: x {:.3}, y {:.3}, z {:.3}",
        fractions.x, fractions.y, fractions.z
    );

    let layers = [
        PointLayer::new(
            walls,
            PointStyle {
                color: [90, 170, 240],
                radius: 1,
            },
        ),
        PointLayer::new(
            cavity,
            PointStyle {
                color: [240, 180, 80],
                radius: 1,
            },
        ),
    ];
    let config = RenderConfig::new((800, 1000), DVec2::new(40.0, 60.0));
    render_layers_to_png(&layers, &config, "box-shell-volume.png")?;

    Ok(())
}
