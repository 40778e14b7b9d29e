// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Python sources loaded by the integration tests.

/// Functions returning one value of each kind the bridge understands, plus a few it
/// does not.
pub const RETURNS: &str = r#"
import datetime


class FailureTest:
    def __str__(self):
        return "FailureTest instance"


def return_true():
    return True


def return_false():
    return False


def return_int():
    return 123


def return_float():
    return 1.0


def return_string():
    return "ABC"


def return_unicode():
    return u"hello"


def return_bytes():
    return b"abcdefg"


def return_bytearray():
    return bytearray(b"abcdefg")


def return_map():
    return {"key1": 123, "key2": "str"}


def return_nested_map():
    return {"key1": {"key2": 123}}


def return_array():
    return [1, 2, {"key": 3}]


def return_none():
    return None


def return_timestamp():
    return datetime.datetime(2015, 5, 1, 14, 27, 0, 500000)


def return_timestamp_with_tz():
    tz = datetime.timezone(datetime.timedelta(hours=9))
    return datetime.datetime(2015, 5, 1, 14, 24, 0, 500000, tzinfo=tz)


def return_onetuple():
    return ("a", {"key1": 1}, [1, 2])


def return_astuple():
    a = "a"
    b = {"key1": 1}
    c = [1, 2]
    return a, b, c


def return_object():
    return FailureTest()


def return_object_in_list():
    return [1, 2, FailureTest()]


def return_big_int():
    return 2 ** 64


def return_surrogate():
    return "\udc80"


def return_int_keyed_map():
    return {1: "one"}


def raise_error():
    raise ValueError("expected failure")


not_callable = 42
"#;

/// Functions inspecting the arguments they are given.
pub const ARGUMENTS: &str = r#"
collected = []


def tostr(arg):
    return str(arg)


def toutf8(arg):
    return arg.decode("utf-8")


def mapinmap(arg):
    return arg["string"] + "_" + arg["map"]["instr"] + "_" + arg["array"][0] + "_" + str(arg["array"][1])


def arrayinmap(arg):
    return arg[0][0] + "_" + str(arg[0][1]) + "_" + arg[1]["map"]


def type_name(arg):
    return type(arg).__name__


def identity(arg):
    return arg


def utc_offset(arg):
    return str(arg.utcoffset())


def collect(arg):
    collected.append(arg)
    return len(collected)


def with_kwargs(a, b=0, **rest):
    return {"a": a, "b": b, "rest": rest}
"#;
