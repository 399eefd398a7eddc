use cgmath::{Point3, Vector3};

use crate::float::*;

/// Components of the position channel, always present.
const POSITION_WIDTH: usize = 3;
/// Components of the normal channel when present.
const NORMAL_WIDTH: usize = 3;

/// Width of the texture coordinate channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TexCoordFormat {
    None,
    Float2,
    Float3,
    Float4,
}

impl TexCoordFormat {
    pub fn components(self) -> usize {
        match self {
            TexCoordFormat::None => 0,
            TexCoordFormat::Float2 => 2,
            TexCoordFormat::Float3 => 3,
            TexCoordFormat::Float4 => 4,
        }
    }
}

/// Width of the color channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFormat {
    None,
    Rgb,
    Rgba,
}

impl ColorFormat {
    pub fn components(self) -> usize {
        match self {
            ColorFormat::None => 0,
            ColorFormat::Rgb => 3,
            ColorFormat::Rgba => 4,
        }
    }
}

/// Physical arrangement of the attribute channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// All channels of one element stored contiguously in a single array.
    Interleaved,
    /// Each channel in its own contiguous array.
    Separate,
}

/// Which channels a buffer carries and how they are stored.
///
/// The position channel is always present. The default format is
/// positions only, separate arrays, non-indexed; other combinations
/// are built with struct update syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexFormat {
    /// Texture coordinate width, or None for no texture coordinates
    pub tex_coords: TexCoordFormat,
    /// Color width, or None for no colors
    pub colors: ColorFormat,
    /// Per-vertex normals present
    pub normals: bool,
    /// Interleaved or separate channel arrays
    pub layout: LayoutMode,
    /// Elements are resolved through an index channel
    pub indexed: bool,
}

impl Default for VertexFormat {
    fn default() -> VertexFormat {
        VertexFormat {
            tex_coords: TexCoordFormat::None,
            colors: ColorFormat::None,
            normals: false,
            layout: LayoutMode::Separate,
            indexed: false,
        }
    }
}

/// Placement of one channel inside its backing array.
#[derive(Clone, Copy, Debug, Default)]
struct ChannelLayout {
    components: usize,
    offset: usize,
    stride: usize,
}

/// Per-channel placement, computed once at construction.
#[derive(Clone, Copy, Debug)]
struct BufferLayout {
    positions: ChannelLayout,
    tex_coords: ChannelLayout,
    colors: ChannelLayout,
    normals: ChannelLayout,
}

impl BufferLayout {
    fn new(format: &VertexFormat) -> BufferLayout {
        let t = format.tex_coords.components();
        let c = format.colors.components();
        let n = if format.normals { NORMAL_WIDTH } else { 0 };
        match format.layout {
            LayoutMode::Interleaved => {
                // position first, then texcoord, color and normal; every
                // channel strides over the whole element
                let stride = POSITION_WIDTH + t + c + n;
                BufferLayout {
                    positions: ChannelLayout {
                        components: POSITION_WIDTH,
                        offset: 0,
                        stride,
                    },
                    tex_coords: ChannelLayout {
                        components: t,
                        offset: POSITION_WIDTH,
                        stride,
                    },
                    colors: ChannelLayout {
                        components: c,
                        offset: POSITION_WIDTH + t,
                        stride,
                    },
                    normals: ChannelLayout {
                        components: n,
                        offset: POSITION_WIDTH + t + c,
                        stride,
                    },
                }
            }
            LayoutMode::Separate => BufferLayout {
                positions: ChannelLayout {
                    components: POSITION_WIDTH,
                    offset: 0,
                    stride: POSITION_WIDTH,
                },
                tex_coords: ChannelLayout {
                    components: t,
                    offset: 0,
                    stride: t,
                },
                colors: ChannelLayout {
                    components: c,
                    offset: 0,
                    stride: c,
                },
                normals: ChannelLayout {
                    components: n,
                    offset: 0,
                    stride: n,
                },
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Channel {
    Position,
    TexCoord,
    Color,
    Normal,
}

#[derive(Clone, Debug)]
enum Store {
    Interleaved(Vec<Float>),
    Separate {
        positions: Vec<Float>,
        tex_coords: Vec<Float>,
        colors: Vec<Float>,
        normals: Vec<Float>,
    },
}

/// A fixed-capacity store of per-element attribute channels (position,
/// texture coordinate, color, normal) with an optional index channel.
///
/// Storage is allocated once at construction; filling, reading and
/// resetting never reallocate, so a buffer can be refilled every frame.
/// Elements are appended with the `add_*` calls: the optional channels
/// write at the current element without advancing it, `add_vertex`
/// completes the element and advances the count.
#[derive(Clone, Debug)]
pub struct AttributeBuffer {
    format: VertexFormat,
    layout: BufferLayout,
    capacity: usize,
    count: usize,
    store: Store,
    indices: Vec<u32>,
    index_count: usize,
}

impl AttributeBuffer {
    /// Buffer for at most `max_vertices` elements. `max_indices` is the
    /// index channel capacity and is ignored unless the format is indexed.
    pub fn new(format: VertexFormat, max_vertices: usize, max_indices: usize) -> AttributeBuffer {
        let layout = BufferLayout::new(&format);
        let store = match format.layout {
            LayoutMode::Interleaved => {
                Store::Interleaved(vec![0.0; max_vertices * layout.positions.stride])
            }
            LayoutMode::Separate => Store::Separate {
                positions: vec![0.0; max_vertices * layout.positions.components],
                tex_coords: vec![0.0; max_vertices * layout.tex_coords.components],
                colors: vec![0.0; max_vertices * layout.colors.components],
                normals: vec![0.0; max_vertices * layout.normals.components],
            },
        };
        let index_capacity = if format.indexed { max_indices } else { 0 };
        AttributeBuffer {
            format,
            layout,
            capacity: max_vertices,
            count: 0,
            store,
            indices: vec![0; index_capacity],
            index_count: 0,
        }
    }

    pub fn format(&self) -> &VertexFormat {
        &self.format
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn index_capacity(&self) -> usize {
        self.indices.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn is_indexed(&self) -> bool {
        self.format.indexed
    }

    /// Number of logical elements: the index count for indexed buffers,
    /// the vertex count otherwise.
    pub fn size(&self) -> usize {
        if self.format.indexed {
            self.index_count
        } else {
            self.count
        }
    }

    /// Resolves logical element `i` to a vertex position, through the
    /// index channel when indexed.
    pub fn element_index(&self, i: usize) -> usize {
        if self.format.indexed {
            self.indices[i] as usize
        } else {
            i
        }
    }

    /// Appends the position of the current element and advances the count.
    /// Panics if the buffer is full.
    pub fn add_vertex(&mut self, position: Point3<Float>) {
        assert!(self.count < self.capacity, "vertex buffer is full");
        let i = self.count;
        self.write(Channel::Position, i, &[position.x, position.y, position.z]);
        self.count += 1;
    }

    /// Writes the texture coordinate of the current element without
    /// advancing it. The slice width must match the format.
    pub fn add_tex_coord(&mut self, tex_coord: &[Float]) {
        assert!(
            self.format.tex_coords != TexCoordFormat::None,
            "buffer has no texture coordinate channel"
        );
        assert!(self.count < self.capacity, "vertex buffer is full");
        self.write(Channel::TexCoord, self.count, tex_coord);
    }

    /// Writes the color of the current element without advancing it.
    pub fn add_color(&mut self, color: &[Float]) {
        assert!(
            self.format.colors != ColorFormat::None,
            "buffer has no color channel"
        );
        assert!(self.count < self.capacity, "vertex buffer is full");
        self.write(Channel::Color, self.count, color);
    }

    /// Writes the normal of the current element without advancing it.
    pub fn add_normal(&mut self, normal: Vector3<Float>) {
        assert!(self.format.normals, "buffer has no normal channel");
        assert!(self.count < self.capacity, "vertex buffer is full");
        self.write(Channel::Normal, self.count, &[normal.x, normal.y, normal.z]);
    }

    pub fn add_index(&mut self, index: u32) {
        assert!(self.format.indexed, "buffer has no index channel");
        assert!(self.index_count < self.indices.len(), "index buffer is full");
        self.indices[self.index_count] = index;
        self.index_count += 1;
    }

    /// Appends whole elements from a flat `[x, y, z]*` array, advancing
    /// the count by the number of elements copied.
    pub fn add_vertices(&mut self, coords: &[Float]) {
        assert_eq!(coords.len() % POSITION_WIDTH, 0, "coords must hold whole elements");
        for chunk in coords.chunks_exact(POSITION_WIDTH) {
            self.add_vertex(Point3::new(chunk[0], chunk[1], chunk[2]));
        }
    }

    /// Writes consecutive texture coordinates starting at the current
    /// element, without advancing it.
    pub fn add_tex_coords(&mut self, tex_coords: &[Float]) {
        self.write_run(Channel::TexCoord, tex_coords);
    }

    /// Writes consecutive colors starting at the current element, without
    /// advancing it.
    pub fn add_colors(&mut self, colors: &[Float]) {
        self.write_run(Channel::Color, colors);
    }

    /// Writes consecutive normals starting at the current element, without
    /// advancing it.
    pub fn add_normals(&mut self, normals: &[Float]) {
        self.write_run(Channel::Normal, normals);
    }

    pub fn add_indices(&mut self, indices: &[u32]) {
        assert!(self.format.indexed, "buffer has no index channel");
        assert!(
            self.index_count + indices.len() <= self.indices.len(),
            "index buffer is full"
        );
        let start = self.index_count;
        self.indices[start..start + indices.len()].copy_from_slice(indices);
        self.index_count += indices.len();
    }

    pub fn vertex(&self, i: usize) -> Point3<Float> {
        let v = self.read(Channel::Position, i);
        Point3::new(v[0], v[1], v[2])
    }

    /// Texture coordinate of element `i`; empty when the channel is absent.
    pub fn tex_coord(&self, i: usize) -> &[Float] {
        self.read(Channel::TexCoord, i)
    }

    /// Color of element `i`; empty when the channel is absent.
    pub fn color(&self, i: usize) -> &[Float] {
        self.read(Channel::Color, i)
    }

    pub fn normal(&self, i: usize) -> Vector3<Float> {
        assert!(self.format.normals, "buffer has no normal channel");
        let n = self.read(Channel::Normal, i);
        Vector3::new(n[0], n[1], n[2])
    }

    pub fn index(&self, i: usize) -> u32 {
        assert!(i < self.index_count, "index {} out of range", i);
        self.indices[i]
    }

    pub fn set_vertex(&mut self, i: usize, position: Point3<Float>) {
        assert!(i < self.count, "element {} out of range", i);
        self.write(Channel::Position, i, &[position.x, position.y, position.z]);
    }

    pub fn set_tex_coord(&mut self, i: usize, tex_coord: &[Float]) {
        assert!(i < self.count, "element {} out of range", i);
        self.write(Channel::TexCoord, i, tex_coord);
    }

    pub fn set_color(&mut self, i: usize, color: &[Float]) {
        assert!(i < self.count, "element {} out of range", i);
        self.write(Channel::Color, i, color);
    }

    pub fn set_normal(&mut self, i: usize, normal: Vector3<Float>) {
        assert!(i < self.count, "element {} out of range", i);
        self.write(Channel::Normal, i, &[normal.x, normal.y, normal.z]);
    }

    /// Rewinds the vertex count to zero. The index channel keeps its
    /// contents; use `reset_all` to drop both. Storage is not released.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Rewinds both the vertex and the index count to zero.
    pub fn reset_all(&mut self) {
        self.count = 0;
        self.index_count = 0;
    }

    fn layout_for(&self, channel: Channel) -> ChannelLayout {
        match channel {
            Channel::Position => self.layout.positions,
            Channel::TexCoord => self.layout.tex_coords,
            Channel::Color => self.layout.colors,
            Channel::Normal => self.layout.normals,
        }
    }

    fn store_for(&self, channel: Channel) -> &[Float] {
        match (&self.store, channel) {
            (Store::Interleaved(data), _) => data,
            (Store::Separate { positions, .. }, Channel::Position) => positions,
            (Store::Separate { tex_coords, .. }, Channel::TexCoord) => tex_coords,
            (Store::Separate { colors, .. }, Channel::Color) => colors,
            (Store::Separate { normals, .. }, Channel::Normal) => normals,
        }
    }

    fn store_for_mut(&mut self, channel: Channel) -> &mut [Float] {
        match (&mut self.store, channel) {
            (Store::Interleaved(data), _) => data,
            (Store::Separate { positions, .. }, Channel::Position) => positions,
            (Store::Separate { tex_coords, .. }, Channel::TexCoord) => tex_coords,
            (Store::Separate { colors, .. }, Channel::Color) => colors,
            (Store::Separate { normals, .. }, Channel::Normal) => normals,
        }
    }

    fn read(&self, channel: Channel, i: usize) -> &[Float] {
        let l = self.layout_for(channel);
        let start = i * l.stride + l.offset;
        &self.store_for(channel)[start..start + l.components]
    }

    fn write(&mut self, channel: Channel, i: usize, values: &[Float]) {
        let l = self.layout_for(channel);
        assert_eq!(
            values.len(),
            l.components,
            "channel width mismatch: expected {} components, got {}",
            l.components,
            values.len()
        );
        let start = i * l.stride + l.offset;
        self.store_for_mut(channel)[start..start + l.components].copy_from_slice(values);
    }

    /// Writes `values.len() / width` consecutive elements of one channel
    /// starting at the current element.
    fn write_run(&mut self, channel: Channel, values: &[Float]) {
        let width = self.layout_for(channel).components;
        assert!(width > 0, "channel not present in buffer format");
        assert_eq!(values.len() % width, 0, "values must hold whole elements");
        let elements = values.len() / width;
        assert!(self.count + elements <= self.capacity, "vertex buffer is full");
        for (k, chunk) in values.chunks_exact(width).enumerate() {
            self.write(channel, self.count + k, chunk);
        }
    }
}
