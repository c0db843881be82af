use tensorkit::{ops, Tensor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // fill-and-add walkthrough
    let mut a: Tensor<f32> = Tensor::zeros([3, 4])?.with_name("a");
    a.fill(3.0);
    let mut b: Tensor<f32> = Tensor::zeros([3, 4])?.with_name("b");
    b.fill(4.0);
    let mut c: Tensor<f32> = Tensor::empty([3, 4])?.with_name("c");

    ops::add(&a, &b, &mut c)?;
    println!("{} + {} -> {}", a, b, c);
    println!("c[2,3] = {}", c.get(&[2, 3])?);

    // mixed element types compute in the destination type
    let ints: Tensor<i32> = Tensor::new(vec![1, 2, 3, 4], [4])?.with_name("ints");
    let floats: Tensor<f32> = Tensor::new(vec![0.5, 1.5, 2.5, 3.5], [4])?.with_name("floats");
    let mut mixed: Tensor<i32> = Tensor::empty([4])?.with_name("mixed");

    ops::add(&ints, &floats, &mut mixed)?;
    println!("{} holds {:?}", mixed, &*mixed.data());

    // reshape is per handle; the buffer stays shared
    let mut m: Tensor<f64> = Tensor::rand([2, 6], Some(7))?.with_name("m");
    let view = m.clone();
    m.reshape([3, 4])?;
    println!(
        "{} and {} share a buffer: {}",
        m,
        view,
        m.shares_buffer_with(&view)
    );

    // writes through one handle are visible through the other
    m.fill(1.0);
    println!("view[0,0] after fill through m = {}", view.get(&[0, 0])?);

    // dtype conversion copies onto a fresh buffer
    let as_i64 = m.cast::<i64>()?;
    println!("{} -> {}", m, as_i64);

    Ok(())
}
