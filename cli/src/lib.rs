// Copyright (C) 2025 the mapfn authors. All rights reserved.

pub mod input;
