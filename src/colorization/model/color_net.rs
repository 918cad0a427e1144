use burn::{
    prelude::*,
    nn::{
        BatchNorm, BatchNormConfig, Relu,
        conv::{Conv2d, Conv2dConfig},
        interpolate::{Interpolate2d, Interpolate2dConfig, InterpolateMode},
        pool::{MaxPool2d, MaxPool2dConfig},
    },
};

use crate::colorization::cifar::IMAGE_SIDE;

/// Lightness in, a/b out.
const INPUT_CHANNELS: usize = 1;
const OUTPUT_CHANNELS: usize = 2;

/*
Layer stack (valid padding everywhere):

    [N,1,32,32]
    conv 1->64 k3   pool  -> 15
    conv 64->128 k3 pool  -> 6
    conv 128->256 k3 pool up -> 4
    conv 256->512 k1 up bn -> 8
    conv 512->256 k3 pool up bn -> 6
    conv 256->128 k3 up bn -> 8
    conv 128->64 k3 up bn -> 12
    conv 64->2 k3 -> 10
    nearest resize -> [N,2,32,32]
*/
#[derive(Module, Debug)]
pub struct ColorNet<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    conv3: Conv2d<B>,
    conv4: Conv2d<B>,
    bn4: BatchNorm<B, 2>,
    conv5: Conv2d<B>,
    bn5: BatchNorm<B, 2>,
    conv6: Conv2d<B>,
    bn6: BatchNorm<B, 2>,
    conv7: Conv2d<B>,
    bn7: BatchNorm<B, 2>,
    conv_out: Conv2d<B>,
    pool: MaxPool2d,
    upsample: Interpolate2d,
    resize: Interpolate2d,
    activation: Option<Relu>,
}

/// Channel widths of the stack. Defaults are the 512-feature variant.
#[derive(Config, Debug)]
pub struct ColorNetConfig {
    #[config(default = "64")]
    pub conv1_channels: usize,
    #[config(default = "128")]
    pub conv2_channels: usize,
    #[config(default = "256")]
    pub conv3_channels: usize,
    #[config(default = "512")]
    pub bottleneck_channels: usize,
    /// Insert ReLU after every hidden convolution. Off reproduces the
    /// purely linear stack.
    #[config(default = "false")]
    pub hidden_activation: bool,
}

impl ColorNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ColorNet<B> {
        let conv = |channels: [usize; 2], kernel: usize| -> Conv2d<B> {
            Conv2dConfig::new(channels, [kernel, kernel]).init(device)
        };

        let c1 = self.conv1_channels;
        let c2 = self.conv2_channels;
        let c3 = self.conv3_channels;
        let c4 = self.bottleneck_channels;

        ColorNet {
            conv1: conv([INPUT_CHANNELS, c1], 3),
            conv2: conv([c1, c2], 3),
            conv3: conv([c2, c3], 3),
            conv4: conv([c3, c4], 1),
            bn4: BatchNormConfig::new(c4).init(device),
            conv5: conv([c4, c3], 3),
            bn5: BatchNormConfig::new(c3).init(device),
            conv6: conv([c3, c2], 3),
            bn6: BatchNormConfig::new(c2).init(device),
            conv7: conv([c2, c1], 3),
            bn7: BatchNormConfig::new(c1).init(device),
            conv_out: conv([c1, OUTPUT_CHANNELS], 3),
            pool: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
            upsample: Interpolate2dConfig::new()
                .with_scale_factor(Some([2.0, 2.0]))
                .with_mode(InterpolateMode::Nearest)
                .init(),
            resize: Interpolate2dConfig::new()
                .with_output_size(Some([IMAGE_SIDE, IMAGE_SIDE]))
                .with_mode(InterpolateMode::Nearest)
                .init(),
            activation: self.hidden_activation.then(Relu::new),
        }
    }
}

impl<B: Backend> ColorNet<B> {
    fn act(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        match &self.activation {
            Some(relu) => relu.forward(x),
            None => x,
        }
    }

    /// `[N, 1, 32, 32]` lightness -> `[N, 2, 32, 32]` chrominance.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        // Encoder
        let x = self.pool.forward(self.act(self.conv1.forward(x)));
        let x = self.pool.forward(self.act(self.conv2.forward(x)));
        let x = self.pool.forward(self.act(self.conv3.forward(x)));
        let x = self.upsample.forward(x);

        // Decoder
        let x = self.upsample.forward(self.act(self.conv4.forward(x)));
        let x = self.bn4.forward(x);

        let x = self.pool.forward(self.act(self.conv5.forward(x)));
        let x = self.bn5.forward(self.upsample.forward(x));

        let x = self.upsample.forward(self.act(self.conv6.forward(x)));
        let x = self.bn6.forward(x);

        let x = self.upsample.forward(self.act(self.conv7.forward(x)));
        let x = self.bn7.forward(x);

        let x = self.conv_out.forward(x);
        self.resize.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn output_matches_input_resolution() {
        let device = Default::default();
        let model = ColorNetConfig::new().init::<TestBackend>(&device);

        let input = Tensor::<TestBackend, 4>::zeros([2, 1, 32, 32], &device);
        assert_eq!(model.forward(input).dims(), [2, 2, 32, 32]);
    }

    #[test]
    fn narrow_variant_with_activation_keeps_shape() {
        let device = Default::default();
        let model = ColorNetConfig::new()
            .with_conv1_channels(4)
            .with_conv2_channels(8)
            .with_conv3_channels(8)
            .with_bottleneck_channels(16)
            .with_hidden_activation(true)
            .init::<TestBackend>(&device);

        let input = Tensor::<TestBackend, 4>::ones([1, 1, 32, 32], &device);
        assert_eq!(model.forward(input).dims(), [1, 2, 32, 32]);
    }

    #[test]
    fn default_widths_are_the_512_feature_stack() {
        let config = ColorNetConfig::new();
        assert_eq!(config.conv1_channels, 64);
        assert_eq!(config.bottleneck_channels, 512);
        assert!(!config.hidden_activation);
    }
}
