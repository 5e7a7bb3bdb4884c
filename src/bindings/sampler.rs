#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerType {
    ///The sampler shall use normalized coordinates and interpolate linearly
    ///between texels in both directions.
    Bilinear,
    ///The sampler shall use normalized coordinates and snap to the nearest
    ///texel.  Appropriate for pixel art or data textures.
    Nearest,
}
