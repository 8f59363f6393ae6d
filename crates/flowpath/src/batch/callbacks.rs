// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::ProgressArgs;

crate::define_fn_wrapper!(OnProgress<R>(Fn(args: ProgressArgs<'_, R>)));
