//! End-to-end scenarios (S1-S7) exercising each engine through the public
//! `Converter`/`CallbackConverter` surface.

use fracsrc::{CallbackConverter, Converter, ConverterType, SrcData};

fn sine(n: usize, cycles_per_sample: f64) -> Vec<f32> {
    (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * cycles_per_sample * i as f64).sin() as f32)
        .collect()
}

#[test]
fn s1_zoh_downsample_flat_signal() {
    let input = vec![1.0f32; 10];
    let mut output = vec![0.0f32; 4];
    let mut converter = Converter::new(ConverterType::ZeroOrderHold, 1).unwrap();
    let mut data = SrcData::new(&input, &mut output, 10, 4, 0.099, true);
    converter.process(&mut data).unwrap();
    assert!(data.output_frames_gen <= 1);
    assert!(output[..data.output_frames_gen].iter().all(|&x| x == 1.0));
}

#[test]
fn s2_linear_upsample_ramp() {
    let input = vec![0.0f32, 1.0, 2.0, 3.0];
    let mut output = vec![0.0f32; 8];
    let mut converter = Converter::new(ConverterType::Linear, 1).unwrap();
    let mut data = SrcData::new(&input, &mut output, 4, 8, 2.0, true);
    converter.process(&mut data).unwrap();
    let expected = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
    assert_eq!(data.output_frames_gen, expected.len());
    for (got, want) in output[..data.output_frames_gen].iter().zip(expected.iter()) {
        assert!((got - want).abs() < 0.01);
    }
}

#[test]
fn s3_sinc_identity() {
    let input = sine(4096, 0.05);
    let mut output = vec![0.0f32; 4100];
    let mut converter = Converter::new(ConverterType::SincBestQuality, 1).unwrap();
    let mut data = SrcData::new(&input, &mut output, input.len(), output.len(), 1.0, true);
    converter.process(&mut data).unwrap();
    assert!((data.output_frames_gen as i64 - 4096).abs() <= 1);
    let peak = output[..data.output_frames_gen]
        .iter()
        .fold(0.0f32, |a, &b| a.max(b.abs()));
    assert!((peak - 1.0).abs() < 0.01, "peak={peak}");
}

#[test]
fn s4_sinc_upsample_2x() {
    let input = sine(4096, 0.05);
    let mut output = vec![0.0f32; 8200];
    let mut converter = Converter::new(ConverterType::SincFastest, 1).unwrap();
    let mut data = SrcData::new(&input, &mut output, input.len(), output.len(), 2.0, true);
    converter.process(&mut data).unwrap();
    assert!((data.output_frames_gen as i64 - 8192).abs() <= 1);
    assert!(output[..data.output_frames_gen].iter().all(|x| x.is_finite()));
    let peak = output[..data.output_frames_gen]
        .iter()
        .fold(0.0f32, |a, &b| a.max(b.abs()));
    assert!((0.99..=1.01).contains(&peak), "peak={peak}");
}

#[test]
fn s5_sinc_downsample_one_third() {
    let input = sine(24000, 0.01);
    let mut output = vec![0.0f32; 8010];
    let mut converter = Converter::new(ConverterType::SincBestQuality, 1).unwrap();
    let mut data = SrcData::new(&input, &mut output, input.len(), output.len(), 1.0 / 3.0, true);
    converter.process(&mut data).unwrap();
    assert!((data.output_frames_gen as i64 - 8000).abs() <= 1);
    assert!(output[0].abs() > 0.1, "first sample={}", output[0]);
}

#[test]
fn s6_time_varying_ratio_streaming() {
    let input = sine(16384, 0.01);
    let mut converter = Converter::new(ConverterType::SincFastest, 1).unwrap();
    let ratio_changes: &[(usize, f64)] =
        &[(0, 1.0), (20000, 1.01), (20200, 1.0), (40000, 1.2), (40300, 1.0)];

    let chunk = 8;
    let mut consumed_total = 0usize;
    let mut produced_total = 0usize;
    let mut change_idx = 0usize;
    let mut global_index = 0usize;
    let mut out_buf = vec![0.0f32; chunk * 4];

    let mut current_ratio = 1.0;
    while consumed_total < input.len() {
        while change_idx < ratio_changes.len() && global_index >= ratio_changes[change_idx].0 {
            current_ratio = ratio_changes[change_idx].1;
            converter.set_ratio(current_ratio).unwrap();
            change_idx += 1;
        }
        let remaining = input.len() - consumed_total;
        let take = remaining.min(chunk);
        let end_of_input = consumed_total + take >= input.len();
        let mut data = SrcData::new(
            &input[consumed_total..consumed_total + take],
            &mut out_buf,
            take,
            out_buf.len(),
            current_ratio,
            end_of_input,
        );
        converter.process(&mut data).unwrap();
        assert!(out_buf[..data.output_frames_gen].iter().all(|x| x.is_finite()));
        consumed_total += data.input_frames_used;
        produced_total += data.output_frames_gen;
        global_index = consumed_total;
        if data.input_frames_used == 0 && data.output_frames_gen == 0 {
            break;
        }
    }
    assert_eq!(consumed_total, input.len());
    assert!(produced_total > 0);
}

#[test]
fn s7_callback_pull_looping_input() {
    let source = sine(16384, 0.002);
    let mut offset = 0usize;
    let source_clone = source.clone();
    let callback: fracsrc::InputCallback = Box::new(move || {
        let chunk: Vec<f32> = (0..128)
            .map(|i| source_clone[(offset + i) % source_clone.len()])
            .collect();
        offset = (offset + 128) % source_clone.len();
        Ok(chunk)
    });
    let mut conv = CallbackConverter::new(ConverterType::SincFastest, 1, 1.0, callback).unwrap();

    let mut out = vec![0.0f32; 128];
    for i in 0..50 {
        let ratio = 1.0 - 0.5 * (i as f64 * 2.0 * std::f64::consts::PI / 20000.0).sin();
        conv.set_ratio(ratio).unwrap();
        let n = conv.read(128, &mut out).unwrap();
        assert!(n > 0, "iteration {i} produced no output");
        assert!(out[..n].iter().all(|x| x.is_finite()));
    }
}
