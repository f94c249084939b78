use std::marker::PhantomData;
use std::mem::size_of;

use bytemuck::Pod;

const INITIAL_CAPACITY: u32 = 4;

/// Growable read-only storage buffer of `I` records, bound as `@group(N) @binding(0)`.
///
/// Growth goes to the next power of two of the requested length. Reallocation
/// recreates the bind group; the layout is stable for the buffer's lifetime.
pub struct DynamicStorageBuffer<I> {
    label: &'static str,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    len: u32,
    capacity: u32,
    _marker: PhantomData<I>,
}

impl<I: Pod> DynamicStorageBuffer<I> {
    pub fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self::with_capacity(device, label, INITIAL_CAPACITY)
    }

    pub fn with_capacity(device: &wgpu::Device, label: &'static str, capacity: u32) -> Self {
        let capacity = capacity.max(1);
        let bind_group_layout = Self::create_bind_group_layout(device, label);
        let buffer = Self::create_buffer(device, label, capacity);
        let bind_group = Self::create_bind_group(device, label, &bind_group_layout, &buffer);

        Self {
            label,
            buffer,
            bind_group_layout,
            bind_group,
            len: 0,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Layout shared by every instance buffer: one read-only storage binding.
    pub fn create_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_buffer(device: &wgpu::Device, label: &str, capacity: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64 * size_of::<I>() as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    fn reallocate(&mut self, device: &wgpu::Device, capacity: u32) {
        log::debug!("{}: reallocating {} -> {} items", self.label, self.capacity, capacity);
        self.buffer = Self::create_buffer(device, self.label, capacity);
        self.bind_group =
            Self::create_bind_group(device, self.label, &self.bind_group_layout, &self.buffer);
        self.capacity = capacity;
    }

    /// Replaces the contents with `data`, growing the buffer if needed.
    pub fn set_data(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[I]) {
        let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
        if len > self.capacity {
            self.reallocate(device, grown_capacity(len));
        }

        self.len = len.min(self.capacity);
        if self.len > 0 {
            queue.write_buffer(
                &self.buffer,
                0,
                bytemuck::cast_slice(&data[..self.len as usize]),
            );
        }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_to(&self, pass: &mut wgpu::RenderPass<'_>, index: u32) {
        pass.set_bind_group(index, &self.bind_group, &[]);
    }
}

/// Capacity after growing to hold `len` items.
fn grown_capacity(len: u32) -> u32 {
    len.max(INITIAL_CAPACITY).checked_next_power_of_two().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_is_power_of_two_with_floor() {
        assert_eq!(grown_capacity(1), 4);
        assert_eq!(grown_capacity(5), 8);
        assert_eq!(grown_capacity(8), 8);
        assert_eq!(grown_capacity(1_000_001), 1 << 20);
    }

    #[test]
    fn growth_saturates() {
        assert_eq!(grown_capacity(u32::MAX), u32::MAX);
    }
}
