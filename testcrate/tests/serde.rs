use fwint::{BigInt, FixedWidthInteger};

#[test]
fn serde() {
    let x0 = FixedWidthInteger::new(-1234, 100, true).unwrap();
    let s = "(value:\"-1234\",width:100,signed:true)";
    assert_eq!(ron::to_string(&x0).unwrap(), s);

    let x1: FixedWidthInteger = ron::from_str(s).unwrap();
    assert_eq!(x0, x1);
    assert_eq!(x1.width(), 100);
    assert!(x1.is_signed());

    // values wider than any primitive
    let x0 = FixedWidthInteger::new(BigInt::from(u128::MAX) << 72usize, 200, false).unwrap();
    let x1: FixedWidthInteger = ron::from_str(&ron::to_string(&x0).unwrap()).unwrap();
    assert_eq!(x0, x1);
    assert_eq!(x1.width(), 200);
    assert!(!x1.is_signed());

    // fields can come in any order
    let x: FixedWidthInteger = ron::from_str("(signed:false,width:8,value:\"200\")").unwrap();
    assert_eq!(x, 200);
    assert_eq!(x.width(), 8);
}

#[test]
fn serde_errors() {
    use ron::from_str;
    // not representable
    assert!(from_str::<FixedWidthInteger>("(value:\"200\",width:8,signed:true)").is_err());
    assert!(from_str::<FixedWidthInteger>("(value:\"0\",width:0,signed:true)").is_err());
    assert!(from_str::<FixedWidthInteger>("(value:\"x\",width:8,signed:true)").is_err());
    // missing, duplicate, and unknown fields
    assert!(from_str::<FixedWidthInteger>("(value:\"1\",width:8)").is_err());
    assert!(
        from_str::<FixedWidthInteger>("(value:\"1\",value:\"1\",width:8,signed:true)").is_err()
    );
    assert!(from_str::<FixedWidthInteger>("(value:\"1\",bw:8,signed:true)").is_err());
}
