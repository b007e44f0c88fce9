// @generated by polycodec. Do not edit.
// Registry fingerprint 0f87d301, 6 codecs.

use polycodec::codegen::runtime::*;

pub static MODULE: GeneratedModule = GeneratedModule {
    fingerprint: 0x0f87d301,
    codecs: &[
        GeneratedCodec {
            name: "Vec2",
            id: 1,
            encode: encode_vec2,
            decode: decode_vec2,
        },
        GeneratedCodec {
            name: "Base",
            id: 2,
            encode: encode_base,
            decode: decode_base,
        },
        GeneratedCodec {
            name: "Middle",
            id: 3,
            encode: encode_middle,
            decode: decode_middle,
        },
        GeneratedCodec {
            name: "Leaf",
            id: 4,
            encode: encode_leaf,
            decode: decode_leaf,
        },
        GeneratedCodec {
            name: "Scene",
            id: 5,
            encode: encode_scene,
            decode: decode_scene,
        },
        GeneratedCodec {
            name: "Node",
            id: 6,
            encode: encode_node,
            decode: decode_node,
        },
    ],
};

fn encode_vec2(ctx: &CodecContext<'_>, object: &Object, out: &mut OutputCursor) -> Result<()> {
    if ctx.begin_encode(1, object, out)? == EncodePrologue::Dispatched {
        return Ok(());
    }
    out.write_f32(expect_f32(field(object, "x")?, "x")?)?;
    out.write_f32(expect_f32(field(object, "y")?, "y")?)?;
    Ok(())
}

fn decode_vec2(ctx: &CodecContext<'_>, input: &mut InputCursor<'_>) -> Result<Object> {
    if let DecodePrologue::Dispatched(object) = ctx.begin_decode(1, input)? {
        return Ok(object);
    }
    let mut object = Object::new("Vec2");
    object.set("x", Value::Float32(input.read_f32()?));
    object.set("y", Value::Float32(input.read_f32()?));
    Ok(object)
}

fn encode_base(ctx: &CodecContext<'_>, object: &Object, out: &mut OutputCursor) -> Result<()> {
    if ctx.begin_encode(2, object, out)? == EncodePrologue::Dispatched {
        return Ok(());
    }
    out.write_i32(expect_i32(field(object, "i")?, "i")?)?;
    out.write_string(expect_str(field(object, "s")?, "s")?)?;
    Ok(())
}

fn decode_base(ctx: &CodecContext<'_>, input: &mut InputCursor<'_>) -> Result<Object> {
    if let DecodePrologue::Dispatched(object) = ctx.begin_decode(2, input)? {
        return Ok(object);
    }
    let mut object = Object::new("Base");
    object.set("i", Value::Int32(input.read_i32()?));
    object.set("s", Value::String(input.read_string()?));
    Ok(object)
}

fn encode_middle(ctx: &CodecContext<'_>, object: &Object, out: &mut OutputCursor) -> Result<()> {
    if ctx.begin_encode(3, object, out)? == EncodePrologue::Dispatched {
        return Ok(());
    }
    out.write_i32(expect_i32(field(object, "i")?, "i")?)?;
    out.write_string(expect_str(field(object, "s")?, "s")?)?;
    out.write_bool(expect_bool(field(object, "flag")?, "flag")?)?;
    write_enum(out, PrimitiveKind::UInt8, field(object, "color")?, "color")?;
    Ok(())
}

fn decode_middle(ctx: &CodecContext<'_>, input: &mut InputCursor<'_>) -> Result<Object> {
    if let DecodePrologue::Dispatched(object) = ctx.begin_decode(3, input)? {
        return Ok(object);
    }
    let mut object = Object::new("Middle");
    object.set("i", Value::Int32(input.read_i32()?));
    object.set("s", Value::String(input.read_string()?));
    object.set("flag", Value::Bool(input.read_bool()?));
    object.set("color", read_enum(input, PrimitiveKind::UInt8)?);
    Ok(object)
}

fn encode_leaf(ctx: &CodecContext<'_>, object: &Object, out: &mut OutputCursor) -> Result<()> {
    if ctx.begin_encode(4, object, out)? == EncodePrologue::Dispatched {
        return Ok(());
    }
    out.write_i32(expect_i32(field(object, "i")?, "i")?)?;
    out.write_string(expect_str(field(object, "s")?, "s")?)?;
    out.write_bool(expect_bool(field(object, "flag")?, "flag")?)?;
    write_enum(out, PrimitiveKind::UInt8, field(object, "color")?, "color")?;
    let items0 = expect_sequence(field(object, "tags")?, "tags")?;
    out.write_count(items0.len(), "sequence")?;
    for item0 in items0 {
        out.write_string(expect_str(item0, "tags")?)?;
    }
    ctx.encode_nested(1, field(object, "origin")?, out)?;
    out.write_char(expect_char(field(object, "letter")?, "letter")?)?;
    Ok(())
}

fn decode_leaf(ctx: &CodecContext<'_>, input: &mut InputCursor<'_>) -> Result<Object> {
    if let DecodePrologue::Dispatched(object) = ctx.begin_decode(4, input)? {
        return Ok(object);
    }
    let mut object = Object::new("Leaf");
    object.set("i", Value::Int32(input.read_i32()?));
    object.set("s", Value::String(input.read_string()?));
    object.set("flag", Value::Bool(input.read_bool()?));
    object.set("color", read_enum(input, PrimitiveKind::UInt8)?);
    let count0 = input.read_count()?;
    let mut items0 = Vec::with_capacity(count0.min(input.remaining()));
    for _ in 0..count0 {
        items0.push(Value::String(input.read_string()?));
    }
    object.set("tags", Value::Sequence(items0));
    object.set("origin", ctx.decode_nested(1, input)?);
    object.set("letter", Value::Char(input.read_char()?));
    Ok(object)
}

fn encode_scene(ctx: &CodecContext<'_>, object: &Object, out: &mut OutputCursor) -> Result<()> {
    if ctx.begin_encode(5, object, out)? == EncodePrologue::Dispatched {
        return Ok(());
    }
    out.write_string(expect_str(field(object, "name")?, "name")?)?;
    let items0 = expect_sequence(field(object, "shapes")?, "shapes")?;
    out.write_count(items0.len(), "sequence")?;
    for item0 in items0 {
        ctx.encode_nested(2, item0, out)?;
    }
    let items0 = expect_array(field(object, "corners")?, "corners")?;
    out.write_count(items0.len(), "array")?;
    for item0 in items0 {
        ctx.encode_nested(1, item0, out)?;
    }
    out.write_blob(expect_bytes(field(object, "payload")?, "payload")?)?;
    let items0 = expect_sequence(field(object, "grid")?, "grid")?;
    out.write_count(items0.len(), "sequence")?;
    for item0 in items0 {
        let items1 = expect_array(item0, "grid")?;
        out.write_count(items1.len(), "array")?;
        for item1 in items1 {
            out.write_i16(expect_i16(item1, "grid")?)?;
        }
    }
    out.write_i8(expect_i8(field(object, "tiny")?, "tiny")?)?;
    out.write_u8(expect_u8(field(object, "level")?, "level")?)?;
    out.write_u16(expect_u16(field(object, "small")?, "small")?)?;
    out.write_u32(expect_u32(field(object, "mid")?, "mid")?)?;
    out.write_u64(expect_u64(field(object, "wide")?, "wide")?)?;
    out.write_f64(expect_f64(field(object, "ratio")?, "ratio")?)?;
    out.write_i64(expect_i64(field(object, "seed")?, "seed")?)?;
    Ok(())
}

fn decode_scene(ctx: &CodecContext<'_>, input: &mut InputCursor<'_>) -> Result<Object> {
    if let DecodePrologue::Dispatched(object) = ctx.begin_decode(5, input)? {
        return Ok(object);
    }
    let mut object = Object::new("Scene");
    object.set("name", Value::String(input.read_string()?));
    let count0 = input.read_count()?;
    let mut items0 = Vec::with_capacity(count0.min(input.remaining()));
    for _ in 0..count0 {
        items0.push(ctx.decode_nested(2, input)?);
    }
    object.set("shapes", Value::Sequence(items0));
    let count0 = input.read_count()?;
    let mut items0 = Vec::with_capacity(count0.min(input.remaining()));
    for _ in 0..count0 {
        items0.push(ctx.decode_nested(1, input)?);
    }
    object.set("corners", Value::Array(items0));
    object.set("payload", Value::Bytes(input.read_blob()?));
    let count0 = input.read_count()?;
    let mut items0 = Vec::with_capacity(count0.min(input.remaining()));
    for _ in 0..count0 {
        let count1 = input.read_count()?;
        let mut items1 = Vec::with_capacity(count1.min(input.remaining()));
        for _ in 0..count1 {
            items1.push(Value::Int16(input.read_i16()?));
        }
        items0.push(Value::Array(items1));
    }
    object.set("grid", Value::Sequence(items0));
    object.set("tiny", Value::Int8(input.read_i8()?));
    object.set("level", Value::UInt8(input.read_u8()?));
    object.set("small", Value::UInt16(input.read_u16()?));
    object.set("mid", Value::UInt32(input.read_u32()?));
    object.set("wide", Value::UInt64(input.read_u64()?));
    object.set("ratio", Value::Float64(input.read_f64()?));
    object.set("seed", Value::Int64(input.read_i64()?));
    Ok(object)
}

fn encode_node(ctx: &CodecContext<'_>, object: &Object, out: &mut OutputCursor) -> Result<()> {
    if ctx.begin_encode(6, object, out)? == EncodePrologue::Dispatched {
        return Ok(());
    }
    out.write_string(expect_str(field(object, "label")?, "label")?)?;
    let items0 = expect_sequence(field(object, "children")?, "children")?;
    out.write_count(items0.len(), "sequence")?;
    for item0 in items0 {
        ctx.encode_nested(6, item0, out)?;
    }
    Ok(())
}

fn decode_node(ctx: &CodecContext<'_>, input: &mut InputCursor<'_>) -> Result<Object> {
    if let DecodePrologue::Dispatched(object) = ctx.begin_decode(6, input)? {
        return Ok(object);
    }
    let mut object = Object::new("Node");
    object.set("label", Value::String(input.read_string()?));
    let count0 = input.read_count()?;
    let mut items0 = Vec::with_capacity(count0.min(input.remaining()));
    for _ in 0..count0 {
        items0.push(ctx.decode_nested(6, input)?);
    }
    object.set("children", Value::Sequence(items0));
    Ok(object)
}
