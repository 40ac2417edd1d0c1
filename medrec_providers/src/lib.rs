mod zhipu;

pub use zhipu::ZhipuProvider;
