use std::io::{Cursor, Read, Seek, SeekFrom};

use iff_chunk::error::{Error, Result};
use iff_chunk::Chunk;
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

#[rustfmt::skip]
const TEST_FILE: &[u8] = &[
    b'T', b'E', b'S', b'T', 0, 0, 0, 2, 42, 24,
    b'F', b'O', b'O', b' ', 0, 0, 0, 20,
        b'I', b'N', b'1', b' ', 0, 0, 0, 1, 255, 0,
        b'I', b'N', b'2', b' ', 0, 0, 0, 2, 127, 129,
];

fn read_byte<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buffer = [0u8; 1];
    assert_eq!(reader.read(&mut buffer)?, 1);
    Ok(buffer[0])
}

#[traced_test]
#[test]
fn read_header() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);

    let chunk = Chunk::new(&mut file)?;
    assert_eq!(chunk.tag(), *b"TEST");
    assert_eq!(chunk.size(), 2);
    assert_eq!(chunk.base(), 8);

    Ok(())
}

#[traced_test]
#[test]
fn basic_read() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);
    let mut chunk = Chunk::new(&mut file)?;

    let mut buffer = [0u8; 10];
    assert_eq!(chunk.read(&mut buffer)?, 2);
    assert_eq!(&buffer[..2], &[42, 24]);

    assert_eq!(chunk.read(&mut buffer)?, 0);

    Ok(())
}

#[traced_test]
#[test]
fn split_reads_return_the_payload_in_order() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);
    Chunk::new(&mut file)?.skip()?;
    let mut foo = Chunk::new(&mut file)?;

    let mut payload = Vec::new();
    for step in [3usize, 1, 7, 9, 4] {
        let mut buffer = vec![0u8; step];
        let read = foo.read(&mut buffer)?;
        payload.extend_from_slice(&buffer[..read]);
    }

    assert_eq!(payload.as_slice(), &TEST_FILE[18..38]);
    assert_eq!(foo.read(&mut [0u8; 4])?, 0);
    drop(foo);

    // Even sized, no padding to skip
    assert_eq!(file.position(), 38);

    Ok(())
}

#[traced_test]
#[test]
fn skip() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);

    let mut chunk = Chunk::new(&mut file)?;
    chunk.skip()?;

    let mut buffer = [0u8; 10];
    assert_eq!(chunk.read(&mut buffer)?, 0);

    let foo = Chunk::new(&mut file)?;
    assert_eq!(foo.tag(), *b"FOO ");

    Ok(())
}

#[traced_test]
#[test]
fn skip_odd_chunk_from_anywhere() -> Result<()> {
    #[rustfmt::skip]
    let data = vec![
        b'O', b'D', b'D', b' ', 0, 0, 0, 5, 1, 2, 3, 4, 5, 0,
        b'N', b'E', b'X', b'T', 0, 0, 0, 0,
    ];

    for start in 0..=5 {
        let mut file = Cursor::new(data.clone());
        let mut chunk = Chunk::new(&mut file)?;
        chunk.seek(SeekFrom::Start(start))?;
        chunk.skip()?;
        assert_eq!(chunk.position(), 5);
        drop(chunk);

        assert_eq!(file.position(), 14);
        assert_eq!(Chunk::new(&mut file)?.tag(), *b"NEXT");
    }

    Ok(())
}

#[traced_test]
#[test]
fn seek() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);
    Chunk::new(&mut file)?.skip()?;
    let mut foo = Chunk::new(&mut file)?;

    assert_eq!(foo.seek(SeekFrom::Current(2))?, 2);
    assert_eq!(read_byte(&mut foo)?, b'1');

    assert_eq!(foo.seek(SeekFrom::Current(9))?, 12);
    assert_eq!(read_byte(&mut foo)?, b'2');

    // Past the end
    assert!(foo.seek(SeekFrom::Current(20)).is_err());
    assert_eq!(foo.position(), 13);

    assert_eq!(foo.seek(SeekFrom::Start(8))?, 8);
    assert_eq!(read_byte(&mut foo)?, 255);

    assert_eq!(foo.seek(SeekFrom::End(-3))?, 17);
    assert_eq!(read_byte(&mut foo)?, 2);

    // Exactly the last byte
    assert_eq!(foo.seek(SeekFrom::Current(1))?, 19);
    assert_eq!(read_byte(&mut foo)?, 129);

    Ok(())
}

#[traced_test]
#[test]
fn seek_out_of_bounds() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);
    Chunk::new(&mut file)?.skip()?;
    let mut foo = Chunk::new(&mut file)?;
    foo.seek(SeekFrom::Start(4))?;

    for pos in [
        SeekFrom::Start(21),
        SeekFrom::Current(-5),
        SeekFrom::Current(17),
        SeekFrom::End(1),
        SeekFrom::End(-21),
    ] {
        let err = foo.seek(pos).unwrap_err();
        assert!(matches!(
            Error::from_io(err),
            Error::InvalidSeekOffset { position: 4, size: 20, .. }
        ));
        assert_eq!(foo.position(), 4);
    }

    // Both ends are allowed
    assert_eq!(foo.seek(SeekFrom::Current(-4))?, 0);
    assert_eq!(foo.seek(SeekFrom::End(0))?, 20);

    Ok(())
}

#[traced_test]
#[test]
fn sub_chunks() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);
    Chunk::new(&mut file)?.skip()?;
    let mut foo = Chunk::new(&mut file)?;

    let mut in1 = Chunk::new(&mut foo)?;
    assert_eq!(in1.tag(), *b"IN1 ");
    in1.skip()?;

    let mut in2 = Chunk::new(&mut foo)?;
    assert_eq!(in2.tag(), *b"IN2 ");
    assert_eq!(in2.seek(SeekFrom::Current(1))?, 1);
    assert_eq!(read_byte(&mut in2)?, 129);

    // The sub chunks filled the parent exactly
    assert!(Chunk::new(&mut foo).unwrap_err().is_end_of_stream());
    drop(foo);

    assert!(Chunk::new(&mut file).unwrap_err().is_end_of_stream());

    Ok(())
}

#[traced_test]
#[test]
fn read_padding() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);
    Chunk::new(&mut file)?.skip()?;
    let mut foo = Chunk::new(&mut file)?;

    let mut in1 = Chunk::new(&mut foo)?;
    let mut data = vec![0u8; in1.size() as usize];
    assert_eq!(in1.read(&mut data)?, 1);
    assert_eq!(data, vec![255]);

    // The pad byte moved the parent onto the next header
    assert_eq!(in1.position(), 1);
    drop(in1);
    assert_eq!(foo.position(), 10);

    let in2 = Chunk::new(&mut foo)?;
    assert_eq!(in2.tag(), *b"IN2 ");

    Ok(())
}

#[traced_test]
#[test]
fn nested_chunk_stays_in_parent() -> Result<()> {
    #[rustfmt::skip]
    let data = vec![
        b'O', b'U', b'T', b'R', 0, 0, 0, 9,
            b'I', b'N', b'N', b'R', 0, 0, 0, 0xFF, 7,
        0,
        b'A', b'F', b'T', b'R', 0, 0, 0, 0,
    ];

    let mut file = Cursor::new(data);
    let mut outer = Chunk::new(&mut file)?;
    let mut inner = Chunk::new(&mut outer)?;
    assert_eq!(inner.size(), 255);

    // The inner chunk lies about its size, the outer one still ends the read
    let mut payload = Vec::new();
    inner.read_to_end(&mut payload)?;
    assert_eq!(payload, vec![7]);

    // And refuses to move past its own end, leaving the inner position alone
    assert!(inner.skip().is_err());
    assert_eq!(inner.position(), 1);
    assert_eq!(inner.remaining(), 254);
    drop(inner);

    outer.skip()?;
    drop(outer);
    assert_eq!(Chunk::new(&mut file)?.tag(), *b"AFTR");

    Ok(())
}

#[traced_test]
#[test]
fn pad_byte_outside_parent_is_ignored() -> Result<()> {
    // Odd child that fills its parent, no room for the pad byte
    #[rustfmt::skip]
    let data = vec![
        b'P', b'R', b'N', b'T', 0, 0, 0, 9,
            b'C', b'H', b'L', b'D', 0, 0, 0, 1, 0x55,
        0,
    ];

    let mut file = Cursor::new(data);
    let mut parent = Chunk::new(&mut file)?;
    let mut child = Chunk::new(&mut parent)?;

    assert_eq!(read_byte(&mut child)?, 0x55);
    assert_eq!(child.read(&mut [0u8; 1])?, 0);
    drop(child);

    assert_eq!(parent.position(), 9);

    Ok(())
}

#[traced_test]
#[test]
fn skip_odd_child_filling_parent() -> Result<()> {
    #[rustfmt::skip]
    let data = vec![
        b'P', b'R', b'N', b'T', 0, 0, 0, 9,
            b'C', b'H', b'L', b'D', 0, 0, 0, 1, 0x55,
        0,
    ];

    let mut file = Cursor::new(data);
    let mut parent = Chunk::new(&mut file)?;
    let mut child = Chunk::new(&mut parent)?;
    child.skip()?;
    drop(child);

    assert_eq!(parent.position(), 9);
    assert!(Chunk::new(&mut parent).unwrap_err().is_end_of_stream());

    Ok(())
}

#[traced_test]
#[test]
fn end_of_stream() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);
    Chunk::new(&mut file)?.skip()?;
    Chunk::new(&mut file)?.skip()?;

    let err = Chunk::new(&mut file).unwrap_err();
    assert!(matches!(err, Error::EndOfStream));

    Ok(())
}

#[traced_test]
#[test]
fn tty() -> Result<()> {
    let mut file = Cursor::new(TEST_FILE);
    let chunk = Chunk::new(&mut file)?;
    assert!(!chunk.is_terminal());

    Ok(())
}
